//! Render context.
//!
//! A [`SqlContext`] carries the positional flags that change how nodes
//! render. It is a small `Copy` value passed down the render call chain: a
//! node that needs different behavior for its subtree derives a modified
//! copy and hands that copy to its own children only, so the change never
//! reaches siblings rendered afterwards.

/// Positional rendering flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SqlContext {
    use_table_aliases: bool,
    quote_identifiers: bool,
}

impl Default for SqlContext {
    fn default() -> Self {
        Self::new()
    }
}

impl SqlContext {
    /// Creates the default context: table aliases on, identifiers unquoted.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            use_table_aliases: true,
            quote_identifiers: false,
        }
    }

    /// Returns whether table aliases are rendered.
    #[must_use]
    pub const fn use_table_aliases(&self) -> bool {
        self.use_table_aliases
    }

    /// Returns whether identifiers are wrapped in double quotes.
    #[must_use]
    pub const fn quote_identifiers(&self) -> bool {
        self.quote_identifiers
    }

    /// Returns a copy with table aliases enabled or disabled.
    #[must_use]
    pub const fn with_table_aliases(self, enabled: bool) -> Self {
        Self {
            use_table_aliases: enabled,
            ..self
        }
    }

    /// Returns a copy with identifier quoting enabled or disabled.
    #[must_use]
    pub const fn with_quoted_identifiers(self, enabled: bool) -> Self {
        Self {
            quote_identifiers: enabled,
            ..self
        }
    }

    /// Appends an identifier, quoting it when the context asks for it.
    ///
    /// Embedded double quotes are doubled.
    pub fn write_identifier(&self, out: &mut String, name: &str) {
        if self.quote_identifiers {
            out.push('"');
            out.push_str(&name.replace('"', "\"\""));
            out.push('"');
        } else {
            out.push_str(name);
        }
    }
}
