//! Layout - Position the cells of a field with Taffy
//!
//! A field is one flex row: a leaf per cell, `gap = spacing`, and when the
//! config splits at the midpoint an extra spacer leaf between the halves.
//! Layout only depends on the config, so it is computed once per field (or
//! again after a resize moves the origin, which the renderer owns).

use taffy::{
    AvailableSpace, Dimension, Display, FlexDirection, LengthPercentage, NodeId, Size, Style,
    TaffyTree,
};

use crate::config::PinFieldConfig;
use crate::error::{PinError, Result};
use crate::types::Rect;

// =============================================================================
// TYPES
// =============================================================================

/// Computed positions of every cell, relative to the field's top-left corner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldLayout {
    /// One rectangle per cell, in cell order.
    pub cells: Vec<Rect>,
    /// Total width of the row.
    pub width: u16,
    /// Total height of the row.
    pub height: u16,
}

impl FieldLayout {
    /// Index of the cell containing the point, if any.
    pub fn cell_at(&self, x: u16, y: u16) -> Option<usize> {
        self.cells.iter().position(|rect| rect.contains(x, y))
    }
}

// =============================================================================
// STYLE BUILDING
// =============================================================================

fn leaf_style(width: u16, height: u16) -> Style {
    Style {
        size: Size {
            width: Dimension::Length(width as f32),
            height: Dimension::Length(height as f32),
        },
        flex_shrink: 0.0,
        ..Default::default()
    }
}

fn row_style(spacing: u16) -> Style {
    Style {
        display: Display::Flex,
        flex_direction: FlexDirection::Row,
        gap: Size {
            width: LengthPercentage::Length(spacing as f32),
            height: LengthPercentage::Length(0.0),
        },
        ..Default::default()
    }
}

fn layout_err(err: impl std::fmt::Display) -> PinError {
    PinError::Layout(err.to_string())
}

// =============================================================================
// MAIN ENTRY POINT
// =============================================================================

/// Lay out the cells of a field described by `config`.
pub fn compute_field_layout(config: &PinFieldConfig) -> Result<FieldLayout> {
    config.validate()?;

    let mut tree: TaffyTree<()> = TaffyTree::new();
    let midpoint = config.splits_at_midpoint().then_some(config.cell_count / 2);

    let mut cell_nodes: Vec<NodeId> = Vec::with_capacity(config.cell_count);
    let mut children: Vec<NodeId> = Vec::with_capacity(config.cell_count + 1);

    for index in 0..config.cell_count {
        if midpoint == Some(index) {
            let spacer = tree
                .new_leaf(leaf_style(config.spacing, config.cell_height))
                .map_err(layout_err)?;
            children.push(spacer);
        }
        let node = tree
            .new_leaf(leaf_style(config.cell_width, config.cell_height))
            .map_err(layout_err)?;
        cell_nodes.push(node);
        children.push(node);
    }

    let root = tree
        .new_with_children(row_style(config.spacing), &children)
        .map_err(layout_err)?;

    tree.compute_layout(
        root,
        Size {
            width: AvailableSpace::MaxContent,
            height: AvailableSpace::MaxContent,
        },
    )
    .map_err(layout_err)?;

    let mut cells = Vec::with_capacity(cell_nodes.len());
    for node in cell_nodes {
        let layout = tree.layout(node).map_err(layout_err)?;
        cells.push(Rect::new(
            layout.location.x.round() as u16,
            layout.location.y.round() as u16,
            layout.size.width.round() as u16,
            layout.size.height.round() as u16,
        ));
    }

    let root_layout = tree.layout(root).map_err(layout_err)?;
    let result = FieldLayout {
        cells,
        width: root_layout.size.width.round() as u16,
        height: root_layout.size.height.round() as u16,
    };
    tracing::trace!(width = result.width, height = result.height, "field layout computed");
    Ok(result)
}

// =============================================================================
// TESTS
// =============================================================================
