//! A statement of any kind.

use super::{Delete, Insert, Select, Update};
use crate::error::Result;
use crate::pool::Recycle;
use crate::render::{Render, RenderContext};

/// One of the four statement kinds.
#[derive(Debug, Clone, PartialEq)]
pub enum Statement {
    /// SELECT statement.
    Select(Select),
    /// INSERT statement.
    Insert(Insert),
    /// UPDATE statement.
    Update(Update),
    /// DELETE statement.
    Delete(Delete),
}

impl From<Select> for Statement {
    fn from(select: Select) -> Self {
        Self::Select(select)
    }
}

impl From<Insert> for Statement {
    fn from(insert: Insert) -> Self {
        Self::Insert(insert)
    }
}

impl From<Update> for Statement {
    fn from(update: Update) -> Self {
        Self::Update(update)
    }
}

impl From<Delete> for Statement {
    fn from(delete: Delete) -> Self {
        Self::Delete(delete)
    }
}

impl Recycle for Statement {
    fn recycle(&mut self) {
        match self {
            Self::Select(s) => s.recycle(),
            Self::Insert(s) => s.recycle(),
            Self::Update(s) => s.recycle(),
            Self::Delete(s) => s.recycle(),
        }
    }
}

impl Render for Statement {
    fn kind(&self) -> &'static str {
        match self {
            Self::Select(s) => s.kind(),
            Self::Insert(s) => s.kind(),
            Self::Update(s) => s.kind(),
            Self::Delete(s) => s.kind(),
        }
    }

    fn render_to(&self, ctx: &mut RenderContext<'_>) -> Result<()> {
        match self {
            Self::Select(s) => s.render_to(ctx),
            Self::Insert(s) => s.render_to(ctx),
            Self::Update(s) => s.render_to(ctx),
            Self::Delete(s) => s.render_to(ctx),
        }
    }
}
