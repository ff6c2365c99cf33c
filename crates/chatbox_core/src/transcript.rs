use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Sender {
    User,
    Bot,
}

impl Sender {
    pub fn as_str(self) -> &'static str {
        match self {
            Sender::User => "user",
            Sender::Bot => "bot",
        }
    }
}

/// Provenance attached to a bot reply.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Source {
    /// Free-form label, rendered verbatim.
    Label(String),
    /// A document or URL plus the index of the chunk the answer came from.
    Cited { source: String, chunk: u64 },
}

impl Source {
    pub fn citation(&self) -> Citation {
        match self {
            Source::Label(label) => Citation::Label(label.clone()),
            Source::Cited { source, chunk } if is_absolute_http_url(source) => Citation::Link {
                url: source.clone(),
                chunk: *chunk,
            },
            Source::Cited { source, chunk } => Citation::Plain {
                source: source.clone(),
                chunk: *chunk,
            },
        }
    }
}

/// How a single source line is presented in the citation block.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Citation {
    Link { url: String, chunk: u64 },
    Plain { source: String, chunk: u64 },
    Label(String),
}

impl fmt::Display for Citation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Citation::Link { url, chunk } => write!(f, "{url} (chunk {chunk})"),
            Citation::Plain { source, chunk } => write!(f, "{source} (chunk {chunk})"),
            Citation::Label(label) => f.write_str(label),
        }
    }
}

/// True for absolute `http`/`https` URLs, which are rendered as links.
pub fn is_absolute_http_url(candidate: &str) -> bool {
    match url::Url::parse(candidate.trim()) {
        Ok(parsed) => matches!(parsed.scheme(), "http" | "https") && parsed.host().is_some(),
        Err(_) => false,
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    text: String,
    sender: Sender,
    sources: Vec<Source>,
}

impl Message {
    pub fn new(text: impl Into<String>, sender: Sender, sources: Vec<Source>) -> Self {
        Self {
            text: text.into(),
            sender,
            sources,
        }
    }

    pub fn user(text: impl Into<String>) -> Self {
        Self::new(text, Sender::User, Vec::new())
    }

    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(text, Sender::Bot, Vec::new())
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn sender(&self) -> Sender {
        self.sender
    }

    pub fn sources(&self) -> &[Source] {
        &self.sources
    }
}

/// Append-only message log plus the transient typing indicator.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Transcript {
    messages: Vec<Message>,
    typing: bool,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, message: Message) {
        self.messages.push(message);
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn is_typing(&self) -> bool {
        self.typing
    }

    /// Returns false when the indicator was already shown.
    pub fn show_typing(&mut self) -> bool {
        !std::mem::replace(&mut self.typing, true)
    }

    /// Returns false when there was no indicator to remove.
    pub fn hide_typing(&mut self) -> bool {
        std::mem::replace(&mut self.typing, false)
    }
}
