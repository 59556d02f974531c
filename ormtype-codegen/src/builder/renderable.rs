//! Declarations describe their output as a flat list of fragments so the
//! same node renders identically at any nesting depth.

/// One piece of a rendered declaration.
#[derive(Debug, Clone, PartialEq)]
pub enum CodeFragment {
    /// A line at the current depth.
    Line(String),
    Blank,
    /// `header`, then `body` one level deeper, then `close`.
    Block {
        header: String,
        body: Vec<CodeFragment>,
        close: String,
    },
    /// Rendered as `/** text */`.
    JsDoc(String),
    /// Rendered as `// text`.
    Comment(String),
}

/// A node that knows how to lay itself out as fragments.
pub trait Renderable {
    fn to_fragments(&self) -> Vec<CodeFragment>;
}

impl<T: Renderable + ?Sized> Renderable for &T {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        (*self).to_fragments()
    }
}

impl Renderable for [CodeFragment] {
    fn to_fragments(&self) -> Vec<CodeFragment> {
        self.to_vec()
    }
}
