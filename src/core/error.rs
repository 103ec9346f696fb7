use thiserror::Error;

/// Message shown when the analysis form is submitted without a keyword.
pub const EMPTY_KEYWORD_MESSAGE: &str = "Por favor ingresa una palabra clave";

#[derive(Error, Debug)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(String),

    /// Bad text typed by the user, message already in user-facing form.
    #[error("{0}")]
    InvalidInput(String),

    #[error("{}", EMPTY_KEYWORD_MESSAGE)]
    EmptyKeyword,

    /// The service rejected the request (4xx).
    #[error("Datos inválidos. Verifica la información ingresada.")]
    Validation { status: u16 },

    /// The service failed while handling the request (5xx).
    #[error("Error del servidor. Intenta nuevamente más tarde.")]
    Server { status: u16 },

    #[error("La solicitud tardó demasiado tiempo. Intenta nuevamente.")]
    Timeout,

    #[error("No se pudo conectar con el servidor. Verifica tu conexión.")]
    Connectivity,

    /// 2xx response whose body could not be decoded.
    #[error("Respuesta inválida del servidor: {0}")]
    InvalidResponse(String),

    #[error("Analysis not found: {0}")]
    NotFound(String),
}

impl Error {
    /// Human-readable text stored in application state and shown to the user.
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// True when the server could not be reached at all.
    pub fn is_connectivity(&self) -> bool {
        matches!(self, Error::Connectivity)
    }
}

pub type Result<T> = std::result::Result<T, Error>;
