//! Functions embedded in markup comments.
//!
//! A comment whose text starts with [`FUNC_COMMENT_PREFIX`] carries a
//! percent-encoded function body. Bodies are never evaluated as code: the
//! first word names a compiler registered in a [`FuncRegistry`] and the rest
//! of the body is handed to it as its argument.

use crate::accessor::{get, map};
use crate::func::Func;
use crate::markup::{Child, Markup};
use percent_encoding::{AsciiSet, CONTROLS, percent_decode_str, utf8_percent_encode};
use std::collections::HashMap;
use std::fmt;
use std::rc::Rc;
use thiserror::Error;

pub const FUNC_COMMENT_PREFIX: &str = "dao-func ";

/// Bytes escaped in comment payloads: anything that could end the comment
/// or be confused with markup, plus `%` itself.
const COMMENT_UNSAFE: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'%')
    .add(b'-')
    .add(b'<')
    .add(b'>')
    .add(b'&');

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UntrustedTemplateError {
    #[error("untrusted template: empty function body")]
    Empty,
    #[error("untrusted template: function body is not valid percent-encoded UTF-8")]
    Encoding,
    #[error("untrusted template: invalid function name {0:?}")]
    InvalidName(String),
    #[error("untrusted template: unknown function {0:?}")]
    UnknownFunction(String),
    #[error("untrusted template: {name}: {message}")]
    Compile { name: String, message: String },
}

type Compiler = Rc<dyn Fn(&str) -> Result<Child, String>>;

/// Named compilers for comment-embedded functions.
#[derive(Clone)]
pub struct FuncRegistry {
    compilers: HashMap<String, Compiler>,
}

impl FuncRegistry {
    /// A registry with no compilers; every embedded function is rejected.
    pub fn empty() -> Self {
        Self {
            compilers: HashMap::new(),
        }
    }

    /// A registry with the built-in compilers:
    ///
    /// - `get <path>`: accessor for a dotted data path
    /// - `text <literal>`: fixed text
    /// - `json <value>`: JSON content, arrays read as positional markup
    /// - `map <path> <template>`: build a JSON markup template per list item
    pub fn new() -> Self {
        let mut registry = Self::empty();
        registry.register("get", |arg| Ok(Child::Accessor(get(arg))));
        registry.register("text", |arg| Ok(Child::from(arg)));
        registry.register("json", |arg| {
            serde_json::from_str(arg)
                .map(Child::from_data)
                .map_err(|e| e.to_string())
        });
        registry.register("map", |arg| {
            let (path, template) = split_word(arg);
            let template: serde_json::Value =
                serde_json::from_str(template).map_err(|e| format!("template: {e}"))?;
            Ok(Child::Func(map(path, Markup::from_json(&template))))
        });
        registry
    }

    pub fn register(
        &mut self,
        name: impl Into<String>,
        compiler: impl Fn(&str) -> Result<Child, String> + 'static,
    ) -> &mut Self {
        self.compilers.insert(name.into(), Rc::new(compiler));
        self
    }

    /// Register a fixed function under `name`; its argument is ignored.
    pub fn register_func(&mut self, name: impl Into<String>, func: Func) -> &mut Self {
        self.register(name, move |_| Ok(Child::Func(func.clone())))
    }

    pub fn contains(&self, name: &str) -> bool {
        self.compilers.contains_key(name)
    }

    /// Compile a decoded function body.
    pub fn compile(&self, body: &str) -> Result<Child, UntrustedTemplateError> {
        let body = body.trim();
        if body.is_empty() {
            return Err(UntrustedTemplateError::Empty);
        }
        let (name, arg) = split_word(body);
        if !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '-' | '.'))
        {
            return Err(UntrustedTemplateError::InvalidName(name.to_string()));
        }
        let compiler = self
            .compilers
            .get(name)
            .ok_or_else(|| UntrustedTemplateError::UnknownFunction(name.to_string()))?;
        compiler(arg).map_err(|message| UntrustedTemplateError::Compile {
            name: name.to_string(),
            message,
        })
    }

    /// Compile the function carried by a comment. `None` when the comment
    /// is an ordinary one.
    pub fn compile_comment(&self, comment: &str) -> Option<Result<Child, UntrustedTemplateError>> {
        let encoded = comment.strip_prefix(FUNC_COMMENT_PREFIX)?;
        Some(
            decode_func_body(encoded)
                .ok_or(UntrustedTemplateError::Encoding)
                .and_then(|body| self.compile(&body)),
        )
    }
}

impl Default for FuncRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for FuncRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<&str> = self.compilers.keys().map(String::as_str).collect();
        names.sort_unstable();
        f.debug_struct("FuncRegistry").field("compilers", &names).finish()
    }
}

/// Comment text carrying `body`, safe to embed in markup.
pub fn encode_func_comment(body: &str) -> String {
    format!("{FUNC_COMMENT_PREFIX}{}", utf8_percent_encode(body, COMMENT_UNSAFE))
}

fn decode_func_body(encoded: &str) -> Option<String> {
    percent_decode_str(encoded.trim())
        .decode_utf8()
        .ok()
        .map(|body| body.into_owned())
}

fn split_word(s: &str) -> (&str, &str) {
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (s, ""),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Literal;

    #[test]
    fn encoded_comments_never_contain_comment_terminators() {
        let comment = encode_func_comment("text --> <b> 100%");
        assert!(comment.starts_with(FUNC_COMMENT_PREFIX));
        let payload = &comment[FUNC_COMMENT_PREFIX.len()..];
        assert!(!payload.contains("--") && !payload.contains('>') && !payload.contains(' '));
        assert_eq!(decode_func_body(payload).as_deref(), Some("text --> <b> 100%"));
    }

    #[test]
    fn builtin_text_and_json() {
        let registry = FuncRegistry::new();
        assert_eq!(
            registry.compile("text  hello world "),
            Ok(Child::Literal(Literal::from("hello world")))
        );
        assert_eq!(registry.compile("json 5"), Ok(Child::from(5)));
        assert!(matches!(registry.compile(r#"json ["b", "x"]"#), Ok(Child::Raw(_))));
    }

    #[test]
    fn rejected_bodies_are_reported() {
        let registry = FuncRegistry::new();
        assert_eq!(registry.compile("   "), Err(UntrustedTemplateError::Empty));
        assert_eq!(
            registry.compile("eval alert(1)"),
            Err(UntrustedTemplateError::UnknownFunction("eval".to_string()))
        );
        assert_eq!(
            registry.compile("(x)=>x"),
            Err(UntrustedTemplateError::InvalidName("(x)=>x".to_string()))
        );
        assert!(matches!(
            registry.compile("json {nope"),
            Err(UntrustedTemplateError::Compile { ref name, .. }) if name == "json"
        ));
    }

    #[test]
    fn ordinary_comments_are_not_functions() {
        let registry = FuncRegistry::new();
        assert!(registry.compile_comment(" just a note ").is_none());
        assert_eq!(
            registry.compile_comment("dao-func %ZZ"),
            Some(Err(UntrustedTemplateError::InvalidName("%ZZ".to_string())))
        );
        assert_eq!(
            registry.compile_comment("dao-func %FF"),
            Some(Err(UntrustedTemplateError::Encoding))
        );
    }

    #[test]
    fn empty_registry_rejects_builtins() {
        let registry = FuncRegistry::empty();
        assert!(!registry.contains("get"));
        assert!(registry.compile("get a.b").is_err());
    }

    #[test]
    fn registered_funcs_compile_to_the_same_callable() {
        let func = Func::new(|_, _| Ok(Child::from("x")));
        let mut registry = FuncRegistry::empty();
        registry.register_func("stamp", func.clone());
        assert_eq!(registry.compile("stamp"), Ok(Child::Func(func)));
    }
}
