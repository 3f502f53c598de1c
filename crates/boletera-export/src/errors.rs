use thiserror::Error;

/// Per-ticket render failure; recovered locally by skipping the ticket.
#[derive(Debug, Error)]
pub enum RenderError {
    /// The ticket has no live visual representation at call time.
    #[error("no visual representation available: {0}")]
    Unavailable(String),
    #[error("render failed: {0}")]
    Failed(String),
}

/// Export pipeline failure surfaced to the caller.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Precondition failure on a single-ticket export.
    #[error("render error: {0}")]
    Render(#[from] RenderError),
    /// The assembler could not build the artifact container.
    #[error("artifact assembly failed: {0}")]
    Assemble(String),
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
