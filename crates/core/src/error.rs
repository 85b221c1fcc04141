use thiserror::Error;

/// Errors raised while flattening a layer tree.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FlattenError {
    #[error("Two layers or groups map to the same output path '{0}'")]
    DuplicatePath(String),

    #[error("Layer name '{0}' cannot be used as a file name")]
    InvalidName(String),
}

/// Errors raised while encoding vector paths into geometry rows.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum EncodeError {
    #[error(
        "Stroke {stroke} of path '{path}' has {len} coordinates, which is not a multiple of 6"
    )]
    IncompleteTriplet {
        path: String,
        stroke: usize,
        len: usize,
    },

    #[error("Path name '{0}' cannot be used as a file name")]
    InvalidName(String),

    #[error("Two paths map to the same geometry table '{0}'")]
    DuplicatePath(String),
}

#[derive(Error, Debug)]
pub enum ManifestError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("XML writer error: {0}")]
    XmlWrite(#[from] quick_xml::Error),

    #[error("XML parse error: {0}")]
    XmlParse(#[from] roxmltree::Error),

    #[error("Expected <{expected}> as the root element, found <{found}>")]
    UnexpectedRoot { expected: &'static str, found: String },

    #[error("Missing required attribute '{attribute}' on <{element}>")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
    },

    #[error("Invalid value '{value}' for attribute '{attribute}' on <{element}>")]
    InvalidAttribute {
        element: &'static str,
        attribute: &'static str,
        value: String,
    },
}

#[derive(Error, Debug)]
pub enum TableError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Malformed geometry row {row}: {message}")]
    Malformed { row: usize, message: String },
}
