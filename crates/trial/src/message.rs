use std::fmt;

/// An append-only text buffer used to build failure and log messages.
///
/// Values are appended through their `Display` implementation, so booleans
/// render as `true` / `false`. Pointers and optional references render a
/// missing value as `(null)`.
///
/// ```
/// # use trial::Message;
/// let msg = Message::new().push("expected ").push(42).push(", got ").push(false);
/// assert_eq!(msg.get_string(), "expected 42, got false");
/// ```
#[derive(Clone, Default, PartialEq, Eq)]
pub struct Message {
    buf: String,
}

const NULL_PLACEHOLDER: &str = "(null)";

impl Message {
    /// Create an empty message.
    #[inline]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a value and return the message, for use in chained expressions.
    #[inline]
    pub fn push<T: fmt::Display>(mut self, value: T) -> Self {
        self.append(value);
        self
    }

    /// Append a value in place.
    pub fn append<T: fmt::Display>(&mut self, value: T) -> &mut Self {
        use std::fmt::Write as _;
        let _ = write!(self.buf, "{}", value);
        self
    }

    /// Append a raw pointer, rendering a null pointer as `(null)`.
    pub fn push_ptr<T: ?Sized>(mut self, ptr: *const T) -> Self {
        if ptr.is_null() {
            self.buf.push_str(NULL_PLACEHOLDER);
        } else {
            self.append(format_args!("{:p}", ptr));
        }
        self
    }

    /// Append an optional value, rendering `None` as `(null)`.
    pub fn push_opt<T: fmt::Display>(self, value: Option<T>) -> Self {
        match value {
            Some(value) => self.push(value),
            None => self.push(NULL_PLACEHOLDER),
        }
    }

    /// Append the content of another message.
    pub fn push_message(mut self, other: &Message) -> Self {
        self.buf.push_str(&other.buf);
        self
    }

    /// Return whether nothing has been appended yet.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Return a snapshot of the accumulated text.
    ///
    /// Embedded NUL characters are escaped as `\0`.
    pub fn get_string(&self) -> String {
        if !self.buf.contains('\0') {
            return self.buf.clone();
        }
        let mut escaped = String::with_capacity(self.buf.len() * 2);
        for ch in self.buf.chars() {
            match ch {
                '\0' => escaped.push_str("\\0"),
                ch => escaped.push(ch),
            }
        }
        escaped
    }
}

impl fmt::Write for Message {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.buf.push_str(s);
        Ok(())
    }
}

impl fmt::Display for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.get_string())
    }
}

impl fmt::Debug for Message {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("Message").field(&self.buf).finish()
    }
}

impl From<&str> for Message {
    fn from(s: &str) -> Self {
        Self { buf: s.to_owned() }
    }
}

impl From<String> for Message {
    fn from(buf: String) -> Self {
        Self { buf }
    }
}
