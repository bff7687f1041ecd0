//! Widget tree arena.
//!
//! The tree owns every widget. Parents and children refer to each other by
//! [`WidgetId`], so outside code (the screen's mouse responder, the focused
//! widget) can observe a widget without owning or borrowing it.

use crate::error::TreeError;
use crate::geometry::{Point, Rect, Size};
use crate::widget::{Canvas, PaintContext, Widget, WidgetId};

struct Node {
    widget: Box<dyn Widget>,
    parent: Option<WidgetId>,
    children: Vec<WidgetId>,
    /// Position relative to the parent, and size
    bounds: Rect,
}

/// Which paint pass to run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PaintPass {
    /// Backgrounds, bodies
    Background,
    /// Overlays drawn after every background
    Foreground,
}

/// Arena of widgets forming one or more trees.
#[derive(Default)]
pub struct WidgetTree {
    nodes: Vec<Node>,
}

impl std::fmt::Debug for WidgetTree {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("WidgetTree")
            .field("len", &self.nodes.len())
            .finish()
    }
}

impl WidgetTree {
    /// Create an empty tree.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of widgets.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Check if the tree is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Whether `id` names a widget in this tree.
    #[must_use]
    pub fn contains(&self, id: WidgetId) -> bool {
        id.index() < self.nodes.len()
    }

    /// Add a parentless widget at the origin with the given size.
    pub fn insert_root(&mut self, widget: Box<dyn Widget>, size: Size) -> WidgetId {
        self.push(widget, None, Rect::from_size(size))
    }

    /// Add a widget under `parent` at `bounds` (relative to the parent).
    ///
    /// Resizable widgets take `bounds.size()`; the rest keep their preferred
    /// size and only use the position.
    pub fn add_child(
        &mut self,
        parent: WidgetId,
        widget: Box<dyn Widget>,
        bounds: Rect,
    ) -> Result<WidgetId, TreeError> {
        if !self.contains(parent) {
            return Err(TreeError::UnknownWidget(parent));
        }
        let size = if widget.can_resize() {
            bounds.size()
        } else {
            widget.preferred_size()
        };
        let id = self.push(
            widget,
            Some(parent),
            Rect::from_origin_size(bounds.origin(), size),
        );
        self.nodes[parent.index()].children.push(id);
        Ok(id)
    }

    fn push(&mut self, mut widget: Box<dyn Widget>, parent: Option<WidgetId>, bounds: Rect) -> WidgetId {
        let id = WidgetId::new(self.nodes.len() as u64);
        widget.set_size(bounds.size());
        self.nodes.push(Node {
            widget,
            parent,
            children: Vec::new(),
            bounds,
        });
        id
    }

    /// Parent of a widget.
    #[must_use]
    pub fn parent(&self, id: WidgetId) -> Option<WidgetId> {
        self.nodes.get(id.index()).and_then(|n| n.parent)
    }

    /// Children of a widget, in insertion (paint) order.
    #[must_use]
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.nodes
            .get(id.index())
            .map_or(&[], |n| n.children.as_slice())
    }

    /// Bounds relative to the parent.
    #[must_use]
    pub fn bounds(&self, id: WidgetId) -> Option<Rect> {
        self.nodes.get(id.index()).map(|n| n.bounds)
    }

    /// Size of a widget.
    #[must_use]
    pub fn size(&self, id: WidgetId) -> Option<Size> {
        self.bounds(id).map(|b| b.size())
    }

    /// Resize a widget and notify it. Unknown ids are ignored.
    pub fn set_size(&mut self, id: WidgetId, size: Size) {
        match self.nodes.get_mut(id.index()) {
            Some(node) => {
                node.bounds = Rect::from_origin_size(node.bounds.origin(), size);
                node.widget.set_size(size);
            }
            None => log::warn!("set_size on unknown widget {id}"),
        }
    }

    /// Move a widget within its parent.
    pub fn set_position(&mut self, id: WidgetId, position: Point) {
        if let Some(node) = self.nodes.get_mut(id.index()) {
            node.bounds = Rect::from_origin_size(position, node.bounds.size());
        }
    }

    /// Position relative to the topmost ancestor.
    #[must_use]
    pub fn absolute_position(&self, id: WidgetId) -> Option<Point> {
        let mut node = self.nodes.get(id.index())?;
        let mut position = node.bounds.origin();
        while let Some(parent) = node.parent {
            node = self.nodes.get(parent.index())?;
            position = position + node.bounds.origin();
        }
        Some(position)
    }

    /// Bounds relative to the topmost ancestor.
    #[must_use]
    pub fn absolute_bounds(&self, id: WidgetId) -> Option<Rect> {
        Some(Rect::from_origin_size(
            self.absolute_position(id)?,
            self.size(id)?,
        ))
    }

    /// Deepest widget under `point`, given in `id`'s local coordinates.
    ///
    /// Returns `None` when the point is outside `id`. Later children are on
    /// top and win overlaps. A container with no child under the point hits
    /// itself.
    #[must_use]
    pub fn hit(&self, id: WidgetId, point: Point) -> Option<WidgetId> {
        let node = self.nodes.get(id.index())?;
        if !node.bounds.size().contains(point) {
            return None;
        }
        node.children
            .iter()
            .rev()
            .find_map(|&child| {
                let offset = self.nodes.get(child.index())?.bounds.origin();
                self.hit(child, point - offset)
            })
            .or(Some(id))
    }

    /// Borrow a widget.
    #[must_use]
    pub fn widget(&self, id: WidgetId) -> Option<&dyn Widget> {
        self.nodes.get(id.index()).map(|n| n.widget.as_ref())
    }

    /// Mutably borrow a widget.
    pub fn widget_mut(&mut self, id: WidgetId) -> Option<&mut (dyn Widget + 'static)> {
        self.nodes.get_mut(id.index()).map(|n| n.widget.as_mut())
    }

    /// Borrow a widget as its concrete type.
    #[must_use]
    pub fn get<T: Widget + 'static>(&self, id: WidgetId) -> Option<&T> {
        self.widget(id)?.as_any().downcast_ref()
    }

    /// Mutably borrow a widget as its concrete type.
    pub fn get_mut<T: Widget + 'static>(&mut self, id: WidgetId) -> Option<&mut T> {
        self.widget_mut(id)?.as_any_mut().downcast_mut()
    }

    /// Every id in the tree, in insertion order.
    pub fn ids(&self) -> impl Iterator<Item = WidgetId> {
        (0..self.nodes.len() as u64).map(WidgetId::new)
    }

    /// Paint the subtree under `root`, parents before children.
    ///
    /// `offset` is the screen position of `root`'s parent space; `mouse` is
    /// the pointer in that same space.
    pub fn paint(
        &self,
        canvas: &mut dyn Canvas,
        pass: PaintPass,
        root: WidgetId,
        offset: Point,
        mouse: Point,
        focus: Option<WidgetId>,
    ) {
        let Some(node) = self.nodes.get(root.index()) else {
            return;
        };
        let origin = offset + node.bounds.origin();
        let ctx = PaintContext {
            bounds: Rect::from_origin_size(origin, node.bounds.size()),
            mouse: mouse.saturating_sub(node.bounds.origin()),
            focused: focus == Some(root),
        };
        match pass {
            PaintPass::Background => node.widget.paint_background(canvas, &ctx),
            PaintPass::Foreground => node.widget.paint_foreground(canvas, &ctx),
        }
        for &child in &node.children {
            self.paint(canvas, pass, child, origin, ctx.mouse, focus);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::event::Event;
    use crate::widget::EventContext;
    use crate::{Color, RecordingCanvas};
    use std::any::Any;

    #[derive(Default)]
    struct Probe {
        resizable: bool,
        size: Size,
    }

    impl Widget for Probe {
        fn as_any(&self) -> &dyn Any {
            self
        }

        fn as_any_mut(&mut self) -> &mut dyn Any {
            self
        }

        fn can_resize(&self) -> bool {
            self.resizable
        }

        fn set_size(&mut self, size: Size) {
            self.size = size;
        }

        fn paint_background(&self, canvas: &mut dyn Canvas, ctx: &PaintContext) {
            canvas.fill_rect(ctx.bounds, Color::WHITE);
        }

        fn event(&mut self, _event: &Event, _ctx: &mut EventContext) {}
    }

    fn resizable() -> Box<Probe> {
        Box::new(Probe {
            resizable: true,
            ..Probe::default()
        })
    }

    fn sample() -> (WidgetTree, WidgetId, WidgetId, WidgetId) {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(resizable(), Size::new(200, 100));
        let inner = tree
            .add_child(root, resizable(), Rect::new(10, 10, 100, 50))
            .expect("root exists");
        let leaf = tree
            .add_child(inner, resizable(), Rect::new(5, 5, 20, 20))
            .expect("inner exists");
        (tree, root, inner, leaf)
    }

    #[test]
    fn test_add_child_unknown_parent() {
        let mut tree = WidgetTree::new();
        let err = tree
            .add_child(WidgetId::new(3), resizable(), Rect::default())
            .unwrap_err();
        assert_eq!(err, TreeError::UnknownWidget(WidgetId::new(3)));
    }

    #[test]
    fn test_non_resizable_child_keeps_preferred_size() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(resizable(), Size::new(50, 50));
        let child = tree
            .add_child(root, Box::new(Probe::default()), Rect::new(1, 2, 40, 40))
            .expect("root exists");
        assert_eq!(tree.bounds(child), Some(Rect::new(1, 2, 18, 18)));
        assert_eq!(tree.get::<Probe>(child).map(|p| p.size), Some(Size::new(18, 18)));
    }

    #[test]
    fn test_absolute_position_sums_ancestors() {
        let (tree, root, inner, leaf) = sample();
        assert_eq!(tree.absolute_position(root), Some(Point::new(0, 0)));
        assert_eq!(tree.absolute_position(inner), Some(Point::new(10, 10)));
        assert_eq!(tree.absolute_position(leaf), Some(Point::new(15, 15)));
        assert_eq!(tree.absolute_bounds(leaf), Some(Rect::new(15, 15, 20, 20)));
    }

    #[test]
    fn test_hit_finds_deepest() {
        let (tree, root, inner, leaf) = sample();
        assert_eq!(tree.hit(root, Point::new(16, 16)), Some(leaf));
        assert_eq!(tree.hit(root, Point::new(80, 40)), Some(inner));
        assert_eq!(tree.hit(root, Point::new(150, 90)), Some(root));
    }

    #[test]
    fn test_hit_outside_is_none() {
        let (tree, root, _, _) = sample();
        assert_eq!(tree.hit(root, Point::new(-1, 5)), None);
        assert_eq!(tree.hit(root, Point::new(200, 5)), None);
        assert_eq!(tree.hit(WidgetId::new(99), Point::ORIGIN), None);
    }

    #[test]
    fn test_hit_prefers_later_sibling() {
        let mut tree = WidgetTree::new();
        let root = tree.insert_root(resizable(), Size::new(100, 100));
        let _under = tree
            .add_child(root, resizable(), Rect::new(0, 0, 50, 50))
            .expect("root exists");
        let over = tree
            .add_child(root, resizable(), Rect::new(25, 25, 50, 50))
            .expect("root exists");
        assert_eq!(tree.hit(root, Point::new(30, 30)), Some(over));
    }

    #[test]
    fn test_set_size_notifies_widget() {
        let (mut tree, _, inner, _) = sample();
        tree.set_size(inner, Size::new(60, 30));
        assert_eq!(tree.size(inner), Some(Size::new(60, 30)));
        assert_eq!(tree.get::<Probe>(inner).map(|p| p.size), Some(Size::new(60, 30)));
        assert_eq!(tree.bounds(inner).map(|b| b.origin()), Some(Point::new(10, 10)));
    }

    #[test]
    fn test_paint_order_and_offsets() {
        let (tree, root, _, _) = sample();
        let mut canvas = RecordingCanvas::new();
        tree.paint(
            &mut canvas,
            PaintPass::Background,
            root,
            Point::new(300, 250),
            Point::ORIGIN,
            None,
        );
        let rects: Vec<Rect> = canvas
            .commands()
            .iter()
            .filter_map(|c| match c {
                crate::DrawCommand::FillRect { rect, .. } => Some(*rect),
                _ => None,
            })
            .collect();
        assert_eq!(
            rects,
            vec![
                Rect::new(300, 250, 200, 100),
                Rect::new(310, 260, 100, 50),
                Rect::new(315, 265, 20, 20),
            ]
        );
    }

    #[test]
    fn test_typed_access_wrong_type() {
        struct Other;
        impl Widget for Other {
            fn as_any(&self) -> &dyn Any {
                self
            }
            fn as_any_mut(&mut self) -> &mut dyn Any {
                self
            }
            fn event(&mut self, _event: &Event, _ctx: &mut EventContext) {}
        }
        let mut tree = WidgetTree::new();
        let id = tree.insert_root(Box::new(Other), Size::new(1, 1));
        assert!(tree.get::<Probe>(id).is_none());
        assert!(tree.get::<Other>(id).is_some());
    }
}
