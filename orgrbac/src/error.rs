#[non_exhaustive]
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("malformed rule at line {line}: {text:?}")]
    Rule {
        line: usize,
        text: String,
    },
}
