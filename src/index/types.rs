/// Classification of an indexed entity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    File,
    Folder,
    Other,
}

impl Kind {
    /// Single-character tag used in info tokens
    pub fn tag(self) -> char {
        match self {
            Kind::File => 'f',
            Kind::Folder => 'd',
            Kind::Other => 'o',
        }
    }

    pub fn from_tag(tag: char) -> Option<Self> {
        match tag {
            'f' => Some(Kind::File),
            'd' => Some(Kind::Folder),
            'o' => Some(Kind::Other),
            _ => None,
        }
    }

    /// Parse the kind column produced by the endpoint query
    pub fn from_column(value: &str) -> Self {
        match value {
            "folder" => Kind::Folder,
            "file" => Kind::File,
            _ => Kind::Other,
        }
    }

    /// Containers can be drilled into; everything else is opened
    pub fn is_container(self) -> bool {
        matches!(self, Kind::Folder)
    }
}

/// One search hit from the index service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Candidate {
    /// Text shown to the user
    pub label: String,
    pub kind: Kind,
    /// Stable handle (the entity URL) used to open or narrow into it
    pub identifier: String,
}

impl Candidate {
    pub fn new(label: impl Into<String>, kind: Kind, identifier: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            kind,
            identifier: identifier.into(),
        }
    }
}

/// A single lookup against the index service
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchRequest {
    /// Free text to match; may be blank when `scope` is set
    pub text: String,
    /// Restrict results to children of this container identifier
    pub scope: Option<String>,
    /// Maximum number of results to ask for
    pub limit: usize,
}

/// Errors talking to the index service
#[derive(Debug, thiserror::Error)]
pub enum IndexError {
    #[error("D-Bus error: {0}")]
    Bus(#[from] dbus::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid response from index service: {0}")]
    Protocol(String),
}

/// The black-box query endpoint behind the adapter
pub trait IndexService {
    fn search(&self, request: &SearchRequest) -> Result<Vec<Candidate>, IndexError>;
}

impl<T: IndexService + ?Sized> IndexService for &T {
    fn search(&self, request: &SearchRequest) -> Result<Vec<Candidate>, IndexError> {
        (**self).search(request)
    }
}
