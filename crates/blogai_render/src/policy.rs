/// How much of each list-shaped field to render.
///
/// Detail pages render everything; cards, previews and republished posts
/// show the first `n` entries followed by a count of the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RenderPolicy {
    pub list_limit: Option<usize>,
}

/// The shown prefix of a list field and how many entries were left out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Truncated<'a, T> {
    pub shown: &'a [T],
    pub remaining: usize,
}

impl RenderPolicy {
    pub fn full() -> Self {
        Self { list_limit: None }
    }

    pub fn preview(limit: usize) -> Self {
        Self {
            list_limit: Some(limit),
        }
    }

    pub fn take<'a, T>(&self, items: &'a [T]) -> Truncated<'a, T> {
        let shown = match self.list_limit {
            Some(limit) if limit < items.len() => &items[..limit],
            _ => items,
        };
        Truncated {
            shown,
            remaining: items.len() - shown.len(),
        }
    }
}
