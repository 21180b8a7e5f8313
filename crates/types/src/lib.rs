//! Validated text primitives shared by the doctor directory crates.

/// Errors that can occur when creating validated text types.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum TextError {
    /// The input text was empty or contained only whitespace
    #[error("must not be empty")]
    Empty,
    /// The trimmed input exceeded the permitted number of characters
    #[error("must be at most {max} characters (got {actual})")]
    TooLong { max: usize, actual: usize },
}

/// A string type that guarantees non-empty content.
///
/// Wraps a `String` containing at least one non-whitespace character. The input is trimmed of
/// leading and trailing whitespace during construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NonEmptyText(String);

impl NonEmptyText {
    /// Creates a new `NonEmptyText` from the given input.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` if the trimmed input is empty.
    pub fn new(input: impl AsRef<str>) -> Result<Self, TextError> {
        let trimmed = input.as_ref().trim();
        if trimmed.is_empty() {
            return Err(TextError::Empty);
        }
        Ok(Self(trimmed.to_owned()))
    }

    /// Creates a new `NonEmptyText` whose trimmed length is bounded by `max` characters.
    ///
    /// Length is counted in `char`s rather than bytes so that names containing accented
    /// characters are measured the way a person would count them.
    ///
    /// # Errors
    ///
    /// Returns `TextError::Empty` or `TextError::TooLong`.
    pub fn with_max_len(input: impl AsRef<str>, max: usize) -> Result<Self, TextError> {
        let text = Self::new(input)?;
        check_len(&text.0, max)?;
        Ok(text)
    }

    /// Returns the inner string as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Consumes the wrapper and returns the owned string.
    pub fn into_inner(self) -> String {
        self.0
    }
}

/// Trims `input` and checks it against a character limit, allowing the empty string.
///
/// Used for free-form fields such as availability, where presence matters but content does not.
///
/// # Errors
///
/// Returns `TextError::TooLong` if the trimmed input has more than `max` characters.
pub fn bounded_text(input: impl AsRef<str>, max: usize) -> Result<String, TextError> {
    let trimmed = input.as_ref().trim();
    check_len(trimmed, max)?;
    Ok(trimmed.to_owned())
}

fn check_len(text: &str, max: usize) -> Result<(), TextError> {
    let actual = text.chars().count();
    if actual > max {
        return Err(TextError::TooLong { max, actual });
    }
    Ok(())
}

impl std::fmt::Display for NonEmptyText {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for NonEmptyText {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl serde::Serialize for NonEmptyText {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.0)
    }
}

impl<'de> serde::Deserialize<'de> for NonEmptyText {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        NonEmptyText::new(&s).map_err(serde::de::Error::custom)
    }
}
