//! Report submission error types.

/// Errors that can occur when submitting a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Reports API returned a non-success status
    #[error("Код ответа: {status}")]
    Api { status: u16, message: String },

    /// Response body was not a report or list of reports
    #[error("JSON parse error: {message}")]
    Json { message: String },

    /// Reading a photo from disk failed
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ReportError {
    /// Message for the failure dialog.
    pub fn user_message(&self) -> String {
        format!("Не удалось отправить данные. Попробуйте ещё раз. {self}")
    }
}

/// The draft is missing something required.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Проверьте форму: {}.", .problems.join(", "))]
pub struct ValidationError {
    pub problems: Vec<&'static str>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn api_error_message() {
        let err = ReportError::Api {
            status: 500,
            message: "Internal Server Error".into(),
        };
        assert_eq!(err.to_string(), "Код ответа: 500");
        assert_eq!(
            err.user_message(),
            "Не удалось отправить данные. Попробуйте ещё раз. Код ответа: 500"
        );
    }

    #[test]
    fn validation_message() {
        let err = ValidationError {
            problems: vec!["добавьте хотя бы одну фотографию", "выберите тип дефекта"],
        };
        assert_eq!(
            err.to_string(),
            "Проверьте форму: добавьте хотя бы одну фотографию, выберите тип дефекта."
        );
    }
}
