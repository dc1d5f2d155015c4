use std::borrow::Cow;
use std::fmt;

/// Attribute key carrying the channel group
pub const GROUP_TITLE: &str = "group-title";
/// Attribute key carrying the EPG identifier
pub const TVG_ID: &str = "tvg-id";
/// Attribute key carrying the EPG display name
pub const TVG_NAME: &str = "tvg-name";

/// Marker that starts a descriptor line
pub const EXTINF_PREFIX: &str = "#EXTINF:";

/// One piece of the descriptor head, the text between the marker and the
/// last comma
#[derive(Debug, Clone, PartialEq, Eq)]
enum HeadSegment {
    /// Duration, whitespace and any bare tokens, kept as written
    Raw(String),
    Attribute {
        key: String,
        value: String,
        /// Text as read, dropped once the value is overwritten
        source: Option<String>,
    },
}

impl HeadSegment {
    fn render(&self, out: &mut String) {
        match self {
            HeadSegment::Raw(text) => out.push_str(text),
            HeadSegment::Attribute {
                source: Some(text), ..
            } => out.push_str(text),
            HeadSegment::Attribute { key, value, .. } => {
                out.push_str(&format!("{key}=\"{value}\""));
            }
        }
    }
}

/// A parsed `#EXTINF` descriptor line.
///
/// The head is kept as an ordered list of raw text and `key="value"`
/// attributes, followed by the display name after the last comma. Until the
/// first mutation the original line is rendered verbatim. A mutation only
/// rewrites the value or name it touched; everything else in the head is
/// written back as it was read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExtInf {
    duration: String,
    head: Vec<HeadSegment>,
    title: String,
    original: Option<String>,
}

impl ExtInf {
    /// Build a descriptor that always renders canonically
    pub fn new<D, T>(duration: D, attributes: Vec<(String, String)>, title: T) -> Self
    where
        D: Into<String>,
        T: Into<String>,
    {
        let duration = duration.into();
        let mut builder = ExtInfBuilder::default();
        builder.push_raw(&duration);
        for (key, value) in attributes {
            builder.push_raw(" ");
            builder.head.push(HeadSegment::Attribute {
                key,
                value,
                source: None,
            });
        }
        builder.finish(duration, title.into(), None)
    }

    pub fn duration(&self) -> &str {
        &self.duration
    }

    /// Attributes in the order they appear on the line
    pub fn attributes(&self) -> impl Iterator<Item = (&str, &str)> {
        self.head.iter().filter_map(|segment| match segment {
            HeadSegment::Attribute { key, value, .. } => Some((key.as_str(), value.as_str())),
            HeadSegment::Raw(_) => None,
        })
    }

    /// Value of the first attribute named `key`
    pub fn attribute(&self, key: &str) -> Option<&str> {
        self.attributes().find(|(k, _)| *k == key).map(|(_, v)| v)
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    /// Replace the display name. Returns whether anything changed.
    pub fn set_title<T: Into<String>>(&mut self, title: T) -> bool {
        let title = title.into();
        if title == self.title {
            return false;
        }
        self.title = title;
        self.original = None;
        true
    }

    /// Overwrite the value of an existing attribute.
    ///
    /// Absent attributes are never inserted; the call returns `false` and the
    /// descriptor is left untouched.
    pub fn replace_attribute<V: Into<String>>(&mut self, key: &str, value: V) -> bool {
        let slot = self.head.iter_mut().find_map(|segment| match segment {
            HeadSegment::Attribute {
                key: k,
                value: current,
                source,
            } if k.as_str() == key => Some((current, source)),
            _ => None,
        });
        let Some((slot, source)) = slot else {
            return false;
        };
        let value = value.into();
        if *slot == value {
            return false;
        }
        *slot = value;
        *source = None;
        self.original = None;
        true
    }

    /// Whether the line has diverged from what was read
    pub fn is_modified(&self) -> bool {
        self.original.is_none()
    }

    /// Render the descriptor line without a trailing line break
    pub fn to_line(&self) -> Cow<'_, str> {
        match &self.original {
            Some(line) => Cow::Borrowed(line.as_str()),
            None => {
                let mut line = String::from(EXTINF_PREFIX);
                for segment in &self.head {
                    segment.render(&mut line);
                }
                line.push(',');
                line.push_str(&self.title);
                Cow::Owned(line)
            }
        }
    }
}

/// Assembles an [`ExtInf`] head segment by segment
#[derive(Debug, Default)]
pub(crate) struct ExtInfBuilder {
    head: Vec<HeadSegment>,
}

impl ExtInfBuilder {
    /// Append text that is not an attribute; empty text is ignored
    pub(crate) fn push_raw(&mut self, text: &str) {
        if text.is_empty() {
            return;
        }
        match self.head.last_mut() {
            Some(HeadSegment::Raw(previous)) => previous.push_str(text),
            _ => self.head.push(HeadSegment::Raw(text.to_string())),
        }
    }

    /// Append an attribute together with the text it was parsed from
    pub(crate) fn push_attribute(&mut self, key: String, value: String, source: &str) {
        self.head.push(HeadSegment::Attribute {
            key,
            value,
            source: Some(source.to_string()),
        });
    }

    pub(crate) fn finish(self, duration: String, title: String, line: Option<&str>) -> ExtInf {
        ExtInf {
            duration,
            head: self.head,
            title,
            original: line.map(str::to_string),
        }
    }
}

impl fmt::Display for ExtInf {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_line())
    }
}

/// One playlist entry: a descriptor line paired with its stream locator
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChannelRecord {
    pub extinf: ExtInf,
    pub stream_url: String,
}

impl ChannelRecord {
    pub fn new<U: Into<String>>(extinf: ExtInf, stream_url: U) -> Self {
        Self {
            extinf,
            stream_url: stream_url.into(),
        }
    }

    /// Value of `group-title`, or the empty string when the attribute is absent
    pub fn group(&self) -> &str {
        self.extinf.attribute(GROUP_TITLE).unwrap_or("")
    }

    /// Text after the last comma of the descriptor line
    pub fn display_name(&self) -> &str {
        self.extinf.title()
    }

    /// The descriptor line as it will be written
    pub fn metadata_line(&self) -> Cow<'_, str> {
        self.extinf.to_line()
    }
}
