use thiserror::Error;

#[derive(Error, Debug)]
pub enum LifeBenchError {
    #[error("test list line {line}: {message}")]
    InvalidTestCase { line: usize, message: String },

    #[error("test list contains no test cases")]
    EmptyTestList,
}
