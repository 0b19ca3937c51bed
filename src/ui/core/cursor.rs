//! Placement log recorded while a container is being built.

use slotmap::SlotMap;

use super::geom::Point;
use super::tree::{ControlId, ControlNode};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum Placement {
    /// Right of the previous control, on the current row.
    SameLine,
    /// Under the previous control, left-aligned with it.
    Below,
    /// At the left edge, under the tallest control of the current row.
    #[default]
    NewLine,
    /// Offset right and down from the previous control.
    Cascade,
    Manual,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LayoutCursor {
    entries: Vec<(ControlId, Placement)>,
}

impl LayoutCursor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, id: ControlId, placement: Placement) {
        self.entries.push((id, placement));
    }

    pub fn entries(&self) -> &[(ControlId, Placement)] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Positions every entry still owned by `owner`, starting at `origin`.
    pub fn apply(
        &self,
        nodes: &mut SlotMap<ControlId, ControlNode>,
        owner: Option<ControlId>,
        origin: Point,
        cascade: i32,
    ) {
        let mut row_top = origin.y;
        let mut row_bottom = origin.y;
        let mut prev: Option<ControlId> = None;

        for &(id, placement) in &self.entries {
            let Some(node) = nodes.get(id) else {
                continue;
            };
            if node.parent != owner {
                continue;
            }
            let margin = node.margin;
            let mut bounds = node.bounds;

            let prev_geom = prev.and_then(|p| nodes.get(p)).map(|p| (p.bounds, p.margin));
            match (placement, prev_geom) {
                (Placement::Manual, _) => {}
                (_, None) => {
                    bounds.set_location(origin + margin.top_left());
                }
                (Placement::SameLine, Some((pb, pm))) => {
                    bounds.set_location(Point::new(
                        pb.right() + i32::from(pm.right) + i32::from(margin.left),
                        row_top + i32::from(margin.top),
                    ));
                }
                (Placement::Below, Some((pb, pm))) => {
                    bounds.set_location(Point::new(
                        pb.left() - i32::from(pm.left) + i32::from(margin.left),
                        pb.bottom() + i32::from(pm.bottom) + i32::from(margin.top),
                    ));
                }
                (Placement::NewLine, Some(_)) => {
                    row_top = row_bottom;
                    bounds.set_location(Point::new(
                        origin.x + i32::from(margin.left),
                        row_top + i32::from(margin.top),
                    ));
                }
                (Placement::Cascade, Some((pb, _))) => {
                    bounds.set_location(pb.location() + Point::new(cascade, cascade));
                }
            }

            row_bottom = row_bottom.max(bounds.bottom() + i32::from(margin.bottom));
            if let Some(node) = nodes.get_mut(id) {
                node.bounds = bounds;
            }
            prev = Some(id);
        }
    }
}

#[cfg(test)]
#[path = "../../../tests/unit/ui/core/cursor.rs"]
mod tests;
