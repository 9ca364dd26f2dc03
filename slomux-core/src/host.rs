//! Minimal component host
//!
//! The host owns the component tree and everything tied to a component
//! instance's lifetime:
//!
//! - **Hook cells**: per-instance memory, created on the first activation
//!   and dropped on unmount (which releases selector subscriptions)
//! - **Context**: values published by providers, looked up by ancestry
//! - **Render queue**: listeners request re-renders by instance id; the
//!   host coalesces them and re-activates only those instances on the next
//!   paint
//! - **Retained output**: each instance paints into its own buffer, which
//!   is reused verbatim while the instance is clean

use std::any::{type_name, Any};
use std::collections::HashMap;
use std::fmt;

use ratatui::{buffer::Buffer, layout::Rect, Frame};
use tokio::sync::mpsc;
use tracing::{debug, trace};

use crate::component::Component;
use crate::context::{Context, ContextProvider, Contexts};
use crate::error::{Error, Result};
use crate::event::EventKind;

/// Stable key of a mounted node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InstanceId(u64);

impl fmt::Display for InstanceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Requests a re-render of one instance
///
/// Requests are queued; the host applies them on its next paint. Requests
/// for an instance that has been unmounted are ignored.
#[derive(Clone)]
pub struct RenderHandle {
    id: InstanceId,
    tx: mpsc::UnboundedSender<InstanceId>,
}

impl RenderHandle {
    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn request_render(&self) {
        if self.tx.send(self.id).is_err() {
            trace!(instance = %self.id, "Host dropped, render request ignored");
        }
    }
}

impl fmt::Debug for RenderHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("RenderHandle").field(&self.id).finish()
    }
}

/// Per-instance hook storage, indexed by call order
#[derive(Default)]
struct HookCells {
    cells: Vec<Box<dyn Any>>,
    cursor: usize,
}

/// What a component sees during one activation
///
/// Gives access to the instance's hook cells, to context published by
/// ancestor providers, and to the instance's [`RenderHandle`].
pub struct Scope<'a> {
    id: InstanceId,
    hooks: &'a mut HookCells,
    nodes: &'a HashMap<InstanceId, Node>,
    render: RenderHandle,
}

impl<'a> Scope<'a> {
    pub fn id(&self) -> InstanceId {
        self.id
    }

    pub fn render_handle(&self) -> RenderHandle {
        self.render.clone()
    }

    /// Nearest value of type `T` published by this instance or an ancestor
    pub fn context<T: Clone + 'static>(&self) -> Option<T> {
        self.find(|contexts| contexts.get::<T>()).cloned()
    }

    /// Nearest value published under `channel`
    pub fn context_in<T: Clone + 'static>(&self, channel: &Context<T>) -> Option<T> {
        self.find(|contexts| contexts.get_in(channel)).cloned()
    }

    /// The next hook cell, created with `init` on the first activation
    ///
    /// Cells are matched to hooks by call order. A cell holding another type
    /// means hooks ran in a different order than before.
    pub fn use_hook<T: 'static>(&mut self, init: impl FnOnce() -> T) -> Result<&mut T> {
        let index = self.hooks.cursor;
        self.hooks.cursor += 1;
        if index == self.hooks.cells.len() {
            self.hooks.cells.push(Box::new(init()));
        }
        self.hooks
            .cells
            .get_mut(index)
            .and_then(|cell| cell.downcast_mut::<T>())
            .ok_or(Error::HookOrder {
                index,
                expected: type_name::<T>(),
            })
    }

    fn find<T: 'static>(&self, get: impl Fn(&'a Contexts) -> Option<&'a T>) -> Option<&'a T> {
        let mut current = Some(self.id);
        while let Some(id) = current {
            let node = self.nodes.get(&id)?;
            if let Some(value) = get(&node.contexts) {
                return Some(value);
            }
            current = node.parent;
        }
        None
    }
}

struct View {
    name: &'static str,
    // Taken out while the component is being activated.
    component: Option<Box<dyn Component>>,
    hooks: HookCells,
    area: Rect,
    buffer: Buffer,
    dirty: bool,
    renders: u64,
}

struct Node {
    parent: Option<InstanceId>,
    children: Vec<InstanceId>,
    contexts: Contexts,
    view: Option<View>,
}

/// Component tree with hook state, context and a render queue
///
/// # Example
///
/// ```ignore
/// let store = Store::new(CounterState::default(), reducer);
/// let mut host = Host::new();
/// let root = host.provide(None, Provider::new(store.clone()))?;
/// let counter = host.mount(Some(root), Counter::default(), area)?;
///
/// terminal.draw(|frame| result = host.draw(frame))?;
///
/// store.dispatch(update_counter(1));
/// if host.has_pending() {
///     terminal.draw(|frame| result = host.draw(frame))?;
/// }
/// ```
pub struct Host {
    nodes: HashMap<InstanceId, Node>,
    roots: Vec<InstanceId>,
    next_id: u64,
    render_tx: mpsc::UnboundedSender<InstanceId>,
    render_rx: mpsc::UnboundedReceiver<InstanceId>,
}

impl Default for Host {
    fn default() -> Self {
        Self::new()
    }
}

impl Host {
    pub fn new() -> Self {
        let (render_tx, render_rx) = mpsc::unbounded_channel();
        Self {
            nodes: HashMap::new(),
            roots: Vec::new(),
            next_id: 0,
            render_tx,
            render_rx,
        }
    }

    /// Mount a context node (e.g. a [`Provider`](crate::Provider)) under `parent`
    pub fn provide<P: ContextProvider>(
        &mut self,
        parent: Option<InstanceId>,
        provider: P,
    ) -> Result<InstanceId> {
        let mut contexts = Contexts::default();
        provider.provide(&mut contexts);
        self.insert(parent, contexts, None)
    }

    /// Mount a component under `parent`, painting into `area`
    ///
    /// The component is first activated on the next paint.
    pub fn mount<C: Component>(
        &mut self,
        parent: Option<InstanceId>,
        component: C,
        area: Rect,
    ) -> Result<InstanceId> {
        let view = View {
            name: component.name(),
            component: Some(Box::new(component)),
            hooks: HookCells::default(),
            area,
            buffer: Buffer::empty(area),
            dirty: true,
            renders: 0,
        };
        self.insert(parent, Contexts::default(), Some(view))
    }

    fn insert(
        &mut self,
        parent: Option<InstanceId>,
        contexts: Contexts,
        view: Option<View>,
    ) -> Result<InstanceId> {
        let id = InstanceId(self.next_id);
        match parent {
            Some(parent_id) => self
                .nodes
                .get_mut(&parent_id)
                .ok_or(Error::UnknownInstance(parent_id))?
                .children
                .push(id),
            None => self.roots.push(id),
        }
        self.next_id += 1;

        let name = view.as_ref().map_or("context", |view| view.name);
        debug!(instance = %id, parent = ?parent, node = name, "Mounted");
        self.nodes.insert(
            id,
            Node {
                parent,
                children: Vec::new(),
                contexts,
                view,
            },
        );
        Ok(id)
    }

    /// Remove a node and its whole subtree
    ///
    /// Dropping the instances' hook cells releases their store subscriptions.
    pub fn unmount(&mut self, id: InstanceId) -> Result<()> {
        let parent = self.nodes.get(&id).ok_or(Error::UnknownInstance(id))?.parent;
        match parent.and_then(|parent_id| self.nodes.get_mut(&parent_id)) {
            Some(parent_node) => parent_node.children.retain(|child| *child != id),
            None => self.roots.retain(|root| *root != id),
        }

        let mut released = 0;
        let mut stack = vec![id];
        while let Some(next) = stack.pop() {
            if let Some(node) = self.nodes.remove(&next) {
                stack.extend(node.children.iter().copied());
                released += 1;
            }
        }
        debug!(instance = %id, released, "Unmounted");
        Ok(())
    }

    pub fn is_mounted(&self, id: InstanceId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// How many times a component instance has been activated
    pub fn render_count(&self, id: InstanceId) -> Option<u64> {
        self.view(id).map(|view| view.renders)
    }

    /// Move a component to a new area; marks it for re-render if it changed
    pub fn set_area(&mut self, id: InstanceId, area: Rect) -> Result<()> {
        let node = self.nodes.get_mut(&id).ok_or(Error::UnknownInstance(id))?;
        if let Some(view) = node.view.as_mut() {
            if view.area != area {
                view.area = area;
                view.dirty = true;
            }
        }
        Ok(())
    }

    /// A handle that queues re-renders of `id`
    pub fn render_handle(&self, id: InstanceId) -> RenderHandle {
        RenderHandle {
            id,
            tx: self.render_tx.clone(),
        }
    }

    /// Queue a re-render of `id`
    pub fn request_render(&self, id: InstanceId) {
        self.render_handle(id).request_render();
    }

    /// Whether the next paint will activate at least one component
    pub fn has_pending(&mut self) -> bool {
        self.collect_requests();
        self.nodes
            .values()
            .any(|node| node.view.as_ref().is_some_and(|view| view.dirty))
    }

    /// Paint every component into `buf`
    ///
    /// Components marked for re-render are activated first; clean ones are
    /// copied from their last output. Painting follows tree order, parents
    /// before children, siblings in mount order.
    pub fn render(&mut self, buf: &mut Buffer) -> Result<()> {
        self.collect_requests();
        for id in self.tree_order() {
            let dirty = match self.view(id) {
                Some(view) => view.dirty,
                None => continue,
            };
            if dirty {
                self.activate(id)?;
            }
            if let Some(view) = self.view(id) {
                blit(&view.buffer, buf);
            }
        }
        Ok(())
    }

    /// Paint into a ratatui frame
    pub fn draw(&mut self, frame: &mut Frame) -> Result<()> {
        self.render(frame.buffer_mut())
    }

    /// Deliver an input event to every component, in tree order
    pub fn handle_event(&mut self, event: &EventKind) {
        for id in self.tree_order() {
            let component = self
                .nodes
                .get_mut(&id)
                .and_then(|node| node.view.as_mut())
                .and_then(|view| view.component.as_mut());
            if let Some(component) = component {
                component.handle_event(event);
            }
        }
    }

    fn view(&self, id: InstanceId) -> Option<&View> {
        self.nodes.get(&id).and_then(|node| node.view.as_ref())
    }

    fn collect_requests(&mut self) {
        while let Ok(id) = self.render_rx.try_recv() {
            match self.nodes.get_mut(&id).and_then(|node| node.view.as_mut()) {
                Some(view) => view.dirty = true,
                None => trace!(instance = %id, "Render request for unmounted instance ignored"),
            }
        }
    }

    fn tree_order(&self) -> Vec<InstanceId> {
        let mut order = Vec::with_capacity(self.nodes.len());
        let mut stack: Vec<InstanceId> = self.roots.iter().rev().copied().collect();
        while let Some(id) = stack.pop() {
            order.push(id);
            if let Some(node) = self.nodes.get(&id) {
                stack.extend(node.children.iter().rev().copied());
            }
        }
        order
    }

    fn activate(&mut self, id: InstanceId) -> Result<()> {
        let view = self
            .nodes
            .get_mut(&id)
            .and_then(|node| node.view.as_mut())
            .ok_or(Error::UnknownInstance(id))?;
        let mut component = view.component.take().ok_or(Error::UnknownInstance(id))?;
        let mut hooks = std::mem::take(&mut view.hooks);
        hooks.cursor = 0;
        let area = view.area;

        let mut buffer = Buffer::empty(area);
        let result = {
            let mut scope = Scope {
                id,
                hooks: &mut hooks,
                nodes: &self.nodes,
                render: self.render_handle(id),
            };
            component.render(&mut scope, area, &mut buffer)
        };

        let view = self
            .nodes
            .get_mut(&id)
            .and_then(|node| node.view.as_mut())
            .ok_or(Error::UnknownInstance(id))?;
        view.component = Some(component);
        view.hooks = hooks;
        result?;

        view.buffer = buffer;
        view.dirty = false;
        view.renders += 1;
        trace!(instance = %id, component = view.name, renders = view.renders, "Activated");
        Ok(())
    }
}

impl fmt::Debug for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Host")
            .field("nodes", &self.nodes.len())
            .field("roots", &self.roots)
            .finish()
    }
}

fn blit(src: &Buffer, dst: &mut Buffer) {
    let area = src.area.intersection(dst.area);
    for y in area.top()..area.bottom() {
        for x in area.left()..area.right() {
            if let (Some(cell), Some(target)) = (src.cell((x, y)), dst.cell_mut((x, y))) {
                *target = cell.clone();
            }
        }
    }
}
