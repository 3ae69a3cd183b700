//! The generated Julia source, as an ordered list of declarations.

use std::fmt;

/// One declaration of the generated file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decl {
    /// Empty line
    Blank,
    /// `# text`, or a bare `#` when the text is empty
    Comment(String),
    /// Triple-quoted docstring attached to the next declaration
    Doc(String),
    /// `const name = value # note`, with the name left-aligned in `pad` columns
    Const {
        name: String,
        pad: usize,
        value: String,
        note: Option<String>,
    },
    /// Single-field immutable struct
    Struct {
        name: String,
        field: String,
        ty: String,
    },
    /// `const name = <open>a, b, ...<close>`, wrapped every `per_line` items
    List {
        name: String,
        open: &'static str,
        close: &'static str,
        items: Vec<String>,
        per_line: usize,
    },
    /// `function(::Type{ty}) = value`
    Dispatch {
        function: String,
        ty: String,
        value: String,
    },
    /// Method of `function` raising an error for every other type
    Fallback { function: String },
}

impl Decl {
    pub fn comment(text: impl Into<String>) -> Self {
        Decl::Comment(text.into())
    }

    pub fn doc(text: impl Into<String>) -> Self {
        Decl::Doc(text.into())
    }

    pub fn constant(name: impl Into<String>, value: impl Into<String>) -> Self {
        Decl::Const {
            name: name.into(),
            pad: 0,
            value: value.into(),
            note: None,
        }
    }
}

impl fmt::Display for Decl {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decl::Blank => Ok(()),
            Decl::Comment(text) if text.is_empty() => write!(f, "#"),
            Decl::Comment(text) => write!(f, "# {}", text),
            Decl::Doc(text) => write!(f, "\"\"\"\n{}\n\"\"\"", text),
            Decl::Const {
                name,
                pad,
                value,
                note,
            } => {
                write!(f, "const {:<pad$} = {}", name, value, pad = *pad)?;
                if let Some(note) = note {
                    write!(f, " # {}", note)?;
                }
                Ok(())
            }
            Decl::Struct { name, field, ty } => {
                write!(f, "struct {}\n    {}::{}\nend", name, field, ty)
            }
            Decl::List {
                name,
                open,
                close,
                items,
                per_line,
            } => {
                let prefix = format!("const {} = {}", name, open);
                f.write_str(&prefix)?;
                for (i, item) in items.iter().enumerate() {
                    if i > 0 {
                        if *per_line > 0 && i % per_line == 0 {
                            write!(f, ",\n{:width$}", "", width = prefix.chars().count())?;
                        } else {
                            f.write_str(", ")?;
                        }
                    }
                    f.write_str(item)?;
                }
                f.write_str(close)
            }
            Decl::Dispatch {
                function,
                ty,
                value,
            } => write!(f, "{}(::Type{{{}}}) = {}", function, ty, value),
            Decl::Fallback { function } => write!(
                f,
                "@noinline {}(::Type{{T}}) where T =\n    error(\"unsupported element type \", T)",
                function
            ),
        }
    }
}

/// Ordered declarations forming a complete file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Artifact {
    decls: Vec<Decl>,
}

impl Artifact {
    pub fn new() -> Self {
        Artifact::default()
    }

    pub fn push(&mut self, decl: Decl) -> &mut Self {
        self.decls.push(decl);
        self
    }

    pub fn decls(&self) -> &[Decl] {
        &self.decls
    }

    pub fn len(&self) -> usize {
        self.decls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.decls.is_empty()
    }

    /// Render the whole file as text.
    pub fn render(&self) -> String {
        let mut text = String::new();
        for decl in &self.decls {
            text.push_str(&decl.to_string());
            text.push('\n');
        }
        text
    }
}
