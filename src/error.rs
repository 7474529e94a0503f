use thiserror::Error;

pub type StocktakeResult<T> = Result<T, StocktakeError>;

#[derive(Error, Debug)]
pub enum StocktakeError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("config error: {0}")]
    Config(String),

    #[error("workbook error: {0}")]
    Workbook(String),

    #[error("worksheet '{0}' not found in workbook")]
    SheetNotFound(String),

    #[error("no {field} column found in sheet '{sheet}' (tried: {tried})")]
    MissingColumn {
        field: &'static str,
        sheet: String,
        tried: String,
    },

    #[error("invalid cell range '{0}'")]
    InvalidRange(String),

    #[error("catalog error: {0}")]
    Catalog(String),

    #[error("validation error: {0}")]
    Validation(String),

    #[error("invalid quantity '{input}' for '{product}'")]
    InvalidQuantity { product: String, input: String },

    #[error("product '{0}' not found in the catalog for this area")]
    UnknownProduct(String),

    #[error("reset aborted: {0}")]
    ResetNotConfirmed(String),

    #[error("prompt error: {0}")]
    Prompt(String),
}
