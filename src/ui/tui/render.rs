use super::{Dashboard, Focus};
use crate::api::model::{Analysis, Sentiment};
use crate::store::state::AppState;
use crate::view::format::{
    date_label, format_created_at, format_news_count, format_percentage, format_score,
    raw_percentage, truncate,
};
use crate::view::sentiment::{bucket_summaries, dominant_sentiment, BucketSummary};
use ratatui::layout::{Alignment, Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::text::{Line, Span};
use ratatui::widgets::{Block, Borders, Clear, List, ListItem, ListState, Paragraph, Wrap};
use ratatui::Frame;

const MAX_SNIPPET_CHARS: usize = 160;

fn sentiment_color(sentiment: Sentiment) -> Color {
    match sentiment {
        Sentiment::Positive => Color::Green,
        Sentiment::Negative => Color::Red,
        Sentiment::Neutral => Color::Gray,
    }
}

fn key_style(color: Color) -> Style {
    Style::default().fg(color).add_modifier(Modifier::BOLD)
}

fn border_style(focused: bool) -> Style {
    if focused {
        Style::default().fg(Color::Yellow)
    } else {
        Style::default().fg(Color::White)
    }
}

pub(super) fn render_dashboard(f: &mut Frame, view: &Dashboard, state: &AppState) {
    let size = f.size();

    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(2), // Header
            Constraint::Min(0),    // Main area
            Constraint::Length(2), // Footer
        ])
        .split(size);

    render_header(f, chunks[0]);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(58), Constraint::Percentage(42)])
        .split(chunks[1]);

    let left = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(8), Constraint::Min(0)])
        .split(columns[0]);

    render_form(f, left[0], view, state);

    match &state.current_analysis {
        Some(analysis) => render_analysis(f, left[1], analysis, true, view.results_scroll),
        None => render_results_placeholder(f, left[1]),
    }

    render_history(f, columns[1], view, state);
    render_footer(f, chunks[2], view);

    if let Some(analysis) = &view.detail {
        let area = centered_rect(85, 85, size);
        f.render_widget(Clear, area);
        let block = Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(Color::Cyan))
            .title(format!("Análisis detallado: {}", analysis.keyword));
        let inner = block.inner(area);
        f.render_widget(block, area);
        render_analysis(f, inner, analysis, false, view.detail_scroll);
    }
}

fn render_header(f: &mut Frame, area: Rect) {
    let header = Paragraph::new(Line::from(vec![
        Span::styled(
            "sentiboard",
            Style::default().fg(Color::Yellow).add_modifier(Modifier::BOLD),
        ),
        Span::raw("  "),
        Span::styled(
            "Análisis de Sentimientos en Noticias",
            Style::default().fg(Color::DarkGray),
        ),
    ]))
    .block(Block::default().borders(Borders::BOTTOM).border_style(Style::default().fg(Color::DarkGray)))
    .alignment(Alignment::Left);
    f.render_widget(header, area);
}

fn render_form(f: &mut Frame, area: Rect, view: &Dashboard, state: &AppState) {
    let focused = view.focus == Focus::Form;
    let form = &view.form;

    let keyword_line = if form.keyword().is_empty() {
        Line::from(vec![
            Span::styled("Palabra clave: ", key_style(Color::Cyan)),
            Span::styled(
                "Ej: tecnología, política, deportes...",
                Style::default().fg(Color::DarkGray),
            ),
        ])
    } else {
        Line::from(vec![
            Span::styled("Palabra clave: ", key_style(Color::Cyan)),
            Span::styled(form.keyword().to_string(), Style::default().fg(Color::White)),
        ])
    };

    let date_line = Line::from(vec![
        Span::styled("Fecha: ", key_style(Color::Cyan)),
        Span::styled(
            format!("< {} >", form.date().label()),
            Style::default().fg(Color::White),
        ),
    ]);

    let button = if state.loading {
        Span::styled("[ Analizando noticias... ]", Style::default().fg(Color::DarkGray))
    } else if form.can_submit(state.loading) {
        Span::styled("[ Analizar Noticias ]", key_style(Color::Green))
    } else {
        Span::styled("[ Analizar Noticias ]", Style::default().fg(Color::DarkGray))
    };

    let mut lines = vec![keyword_line, date_line, Line::from(button)];

    if let Some(msg) = form.error() {
        lines.push(Line::from(Span::styled(msg.to_string(), key_style(Color::Red))));
    }
    if let Some(msg) = &state.error {
        lines.push(Line::from(vec![
            Span::styled(msg.clone(), key_style(Color::Red)),
            Span::styled("  (Enter: reintentar)", Style::default().fg(Color::DarkGray)),
        ]));
    }

    let paragraph = Paragraph::new(lines)
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(border_style(focused))
                .title("Análisis de Sentimientos"),
        )
        .wrap(Wrap { trim: false });
    f.render_widget(paragraph, area);
}

fn render_results_placeholder(f: &mut Frame, area: Rect) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled(
            "Ingresa una palabra clave para analizar las noticias",
            Style::default().fg(Color::White),
        )),
    ];
    let paragraph = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title("Resultados"))
        .alignment(Alignment::Center);
    f.render_widget(paragraph, area);
}

/// Summary cards followed by the ranked news of each bucket
fn render_analysis(f: &mut Frame, area: Rect, analysis: &Analysis, show_title: bool, scroll: u16) {
    let title_height = if show_title { 3 } else { 0 };
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(title_height),
            Constraint::Length(5),
            Constraint::Min(0),
        ])
        .split(area);

    if show_title {
        let title = Paragraph::new(vec![
            Line::from(Span::styled(
                format!("Análisis de \"{}\"", keyword_or_placeholder(analysis)),
                Style::default().fg(Color::White).add_modifier(Modifier::BOLD),
            )),
            Line::from(Span::styled(
                format!(
                    "{} analizadas - {}",
                    format_news_count(analysis.total_count()),
                    date_label(&analysis.date)
                ),
                Style::default().fg(Color::DarkGray),
            )),
        ])
        .block(Block::default().borders(Borders::TOP))
        .alignment(Alignment::Center);
        f.render_widget(title, chunks[0]);
    }

    let buckets = bucket_summaries(analysis);
    let cards = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
            Constraint::Ratio(1, 3),
        ])
        .split(chunks[1]);
    for (bucket, card_area) in buckets.iter().zip(cards.iter()) {
        render_card(f, *card_area, bucket);
    }

    let paragraph = Paragraph::new(news_lines(&buckets))
        .block(Block::default().borders(Borders::ALL).title("Noticias"))
        .wrap(Wrap { trim: false })
        .scroll((scroll, 0));
    f.render_widget(paragraph, chunks[2]);
}

fn render_card(f: &mut Frame, area: Rect, bucket: &BucketSummary<'_>) {
    let color = sentiment_color(bucket.sentiment);
    let card = Paragraph::new(vec![
        Line::from(Span::styled(
            format_percentage(bucket.percentage),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )),
        Line::from(Span::styled(
            format_news_count(bucket.news_count as u64),
            Style::default().fg(Color::DarkGray),
        )),
    ])
    .block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(Style::default().fg(color))
            .title(format!("{} {}", bucket.sentiment.icon(), bucket.label())),
    )
    .alignment(Alignment::Center);
    f.render_widget(card, area);
}

fn news_lines(buckets: &[BucketSummary<'_>]) -> Vec<Line<'static>> {
    let mut lines = Vec::new();

    for bucket in buckets.iter().filter(|b| !b.top_news.is_empty()) {
        let color = sentiment_color(bucket.sentiment);
        lines.push(Line::from(Span::styled(
            format!("{} Top 5 Noticias {}", bucket.sentiment.icon(), bucket.label()),
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )));

        for (rank, item) in bucket.top_news.iter().enumerate() {
            lines.push(Line::from(vec![
                Span::styled(format!("#{} ", rank + 1), Style::default().fg(Color::DarkGray)),
                Span::styled(
                    format!("[{}] ", item.sentiment.item_label()),
                    Style::default().fg(sentiment_color(item.sentiment)),
                ),
                Span::styled(item.title.clone(), Style::default().fg(Color::White).add_modifier(Modifier::BOLD)),
            ]));
            if !item.snippet.is_empty() {
                lines.push(Line::from(Span::styled(
                    format!("   {}", truncate(&item.snippet, MAX_SNIPPET_CHARS)),
                    Style::default().fg(Color::Gray),
                )));
            }
            lines.push(Line::from(vec![
                Span::styled(format!("   {}  ", format_score(item.score)), Style::default().fg(Color::DarkGray)),
                Span::styled(item.link.clone(), Style::default().fg(Color::Blue)),
            ]));
        }
        lines.push(Line::from(""));
    }

    if lines.is_empty() {
        lines.push(Line::from(Span::styled(
            "Sin noticias para mostrar",
            Style::default().fg(Color::DarkGray),
        )));
    }
    lines
}

fn render_history(f: &mut Frame, area: Rect, view: &Dashboard, state: &AppState) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Length(3), Constraint::Min(0)])
        .split(area);

    let (visible, filter_error) = view.visible_history(state);

    let filter_focused = view.focus == Focus::Filter;
    let filter_line = match (&filter_error, view.filter_text.is_empty()) {
        (Some(err), _) => Line::from(vec![
            Span::styled(view.filter_text.clone(), Style::default().fg(Color::White)),
            Span::raw("  "),
            Span::styled(err.clone(), Style::default().fg(Color::Red)),
        ]),
        (None, true) => Line::from(Span::styled(
            "AAAA-MM-DD (vacío: todas)",
            Style::default().fg(Color::DarkGray),
        )),
        (None, false) => Line::from(Span::styled(
            view.filter_text.clone(),
            Style::default().fg(Color::White),
        )),
    };
    let filter = Paragraph::new(filter_line).block(
        Block::default()
            .borders(Borders::ALL)
            .border_style(border_style(filter_focused))
            .title("Filtrar por fecha"),
    );
    f.render_widget(filter, chunks[0]);

    let list_focused = view.focus == Focus::History;
    let block = Block::default()
        .borders(Borders::ALL)
        .border_style(border_style(list_focused))
        .title(format!("Análisis Previos ({})", visible.len()));

    if visible.is_empty() {
        let text = if state.previous_analyses.is_empty() {
            "No hay análisis previos disponibles"
        } else {
            "Ningún análisis coincide con la fecha"
        };
        let empty = Paragraph::new(vec![
            Line::from(""),
            Line::from(Span::styled(text, Style::default().fg(Color::DarkGray))),
        ])
        .block(block)
        .alignment(Alignment::Center);
        f.render_widget(empty, chunks[1]);
        return;
    }

    let items: Vec<ListItem> = visible.iter().map(|analysis| history_item(analysis)).collect();
    let list = List::new(items).block(block).highlight_style(
        Style::default()
            .fg(Color::Black)
            .bg(Color::Yellow)
            .add_modifier(Modifier::BOLD),
    );

    let mut list_state = ListState::default();
    list_state.select(Some(view.history_selected.min(visible.len() - 1)));
    f.render_stateful_widget(list, chunks[1], &mut list_state);
}

fn history_item(analysis: &Analysis) -> ListItem<'static> {
    let dominant = dominant_sentiment(analysis);
    let pct = |s: Sentiment| {
        Span::styled(
            format!("{}: {}  ", s.short_label(), raw_percentage(analysis.percentages.get(s))),
            Style::default().fg(sentiment_color(s)),
        )
    };

    ListItem::new(vec![
        Line::from(vec![
            Span::styled(
                format!("{} ", dominant.icon()),
                Style::default().fg(sentiment_color(dominant)),
            ),
            Span::styled(analysis.keyword.clone(), Style::default().add_modifier(Modifier::BOLD)),
        ]),
        Line::from(Span::styled(
            format!(
                "   {}  {}",
                format_news_count(analysis.total_count()),
                format_created_at(analysis.created_at.as_ref())
            ),
            Style::default().fg(Color::DarkGray),
        )),
        Line::from(vec![
            Span::raw("   "),
            pct(Sentiment::Positive),
            pct(Sentiment::Negative),
            pct(Sentiment::Neutral),
        ]),
    ])
}

fn render_footer(f: &mut Frame, area: Rect, view: &Dashboard) {
    let hints: Vec<Span> = if view.detail.is_some() {
        vec![
            Span::styled("↑↓", key_style(Color::Cyan)),
            Span::raw(": Scroll  "),
            Span::styled("Esc", key_style(Color::Yellow)),
            Span::raw(": Cerrar"),
        ]
    } else {
        match view.focus {
            Focus::Form => vec![
                Span::styled("Enter", key_style(Color::Green)),
                Span::raw(": Analizar  "),
                Span::styled("←→", key_style(Color::Cyan)),
                Span::raw(": Hoy/Ayer  "),
                Span::styled("Ctrl+U", key_style(Color::Cyan)),
                Span::raw(": Limpiar  "),
                Span::styled("Esc", key_style(Color::Yellow)),
                Span::raw(": Quitar resultado  "),
                Span::styled("Tab", key_style(Color::Magenta)),
                Span::raw(": Historial  "),
                Span::styled("Ctrl+C", key_style(Color::Red)),
                Span::raw(": Salir"),
            ],
            Focus::History => vec![
                Span::styled("↑↓", key_style(Color::Cyan)),
                Span::raw(": Navegar  "),
                Span::styled("Enter", key_style(Color::Green)),
                Span::raw(": Detalle  "),
                Span::styled("/", key_style(Color::Magenta)),
                Span::raw(": Filtrar  "),
                Span::styled("r", key_style(Color::Cyan)),
                Span::raw(": Recargar  "),
                Span::styled("Tab", key_style(Color::Magenta)),
                Span::raw(": Formulario  "),
                Span::styled("q", key_style(Color::Red)),
                Span::raw(": Salir"),
            ],
            Focus::Filter => vec![
                Span::styled("Enter/Esc", key_style(Color::Green)),
                Span::raw(": Aplicar  "),
                Span::styled("Ctrl+U", key_style(Color::Cyan)),
                Span::raw(": Limpiar filtro"),
            ],
        }
    };

    let footer = Paragraph::new(Line::from(hints))
        .style(Style::default().fg(Color::DarkGray))
        .alignment(Alignment::Center)
        .block(Block::default().borders(Borders::TOP).border_style(Style::default().fg(Color::DarkGray)));
    f.render_widget(footer, area);
}

fn keyword_or_placeholder(analysis: &Analysis) -> &str {
    if analysis.keyword.is_empty() {
        "Sin palabra clave"
    } else {
        &analysis.keyword
    }
}

fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let vertical = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(vertical[1])[1]
}
