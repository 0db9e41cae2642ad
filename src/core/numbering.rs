use super::error::InvoiceError;

/// Sequential invoice number generator.
///
/// Generates numbers in the format `{prefix}{sequential}`, e.g. "1", "2" with
/// an empty prefix or "INV-0001" with prefix "INV-" and padding 4.
///
/// The counter lives in memory only; numbers restart with the process.
#[derive(Debug, Clone)]
pub struct InvoiceNumberSequence {
    prefix: String,
    next_number: u64,
    zero_pad: usize,
}

impl Default for InvoiceNumberSequence {
    fn default() -> Self {
        Self::new("")
    }
}

impl InvoiceNumberSequence {
    /// Create a new sequence starting at 1, without padding.
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            next_number: 1,
            zero_pad: 0,
        }
    }

    /// Create a sequence continuing from a given number.
    pub fn starting_at(prefix: impl Into<String>, next_number: u64) -> Result<Self, InvoiceError> {
        if next_number == 0 {
            return Err(InvoiceError::Numbering(
                "invoice numbers start at 1".into(),
            ));
        }
        Ok(Self {
            prefix: prefix.into(),
            next_number,
            zero_pad: 0,
        })
    }

    /// Set zero-padding width (default: none).
    pub fn with_padding(mut self, width: usize) -> Self {
        self.zero_pad = width;
        self
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Generate the next invoice number.
    ///
    /// Fails once the counter reaches `u64::MAX`; the sequence is then
    /// exhausted and stays where it is.
    pub fn next_number(&mut self) -> Result<String, InvoiceError> {
        let following = self.next_number.checked_add(1).ok_or_else(|| {
            InvoiceError::Numbering(format!(
                "invoice number sequence '{}' is exhausted",
                self.prefix
            ))
        })?;
        let number = self.render(self.next_number);
        self.next_number = following;
        Ok(number)
    }

    /// Preview the next number without consuming it.
    pub fn peek(&self) -> String {
        self.render(self.next_number)
    }

    /// Get the next number that will be issued (without prefix/formatting).
    pub fn next_raw(&self) -> u64 {
        self.next_number
    }

    /// Account for a number assigned by hand. If it belongs to this sequence
    /// and is at or past the counter, the counter moves beyond it.
    /// Returns true if the counter advanced.
    pub fn observe(&mut self, number: &str) -> bool {
        let Some(digits) = number.strip_prefix(self.prefix.as_str()) else {
            return false;
        };
        if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
            return false;
        }
        match digits.parse::<u64>() {
            Ok(n) if n >= self.next_number => {
                self.next_number = n.saturating_add(1);
                true
            }
            _ => false,
        }
    }

    fn render(&self, n: u64) -> String {
        format!("{}{:0>width$}", self.prefix, n, width = self.zero_pad)
    }
}
