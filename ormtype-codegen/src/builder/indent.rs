/// Width of one nesting level, in spaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Indent(u8);

impl Indent {
    pub const fn spaces(width: u8) -> Self {
        Self(width)
    }

    pub fn width(self) -> usize {
        usize::from(self.0)
    }

    /// Append the padding for `depth` levels to `buf`.
    pub(crate) fn pad(self, buf: &mut String, depth: usize) {
        buf.extend(std::iter::repeat_n(' ', self.width() * depth));
    }
}

impl Default for Indent {
    fn default() -> Self {
        Self::spaces(2)
    }
}
