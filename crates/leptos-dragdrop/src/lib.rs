//! Leptos DragDrop Utilities
//!
//! Simple drag-and-drop reordering for flat Leptos lists using mouse events.
//! Uses movement threshold to distinguish click from drag. When a drag
//! completes the caller receives the dragged key and the full new order of
//! keys; it never needs to know how the drag was tracked.

use leptos::prelude::*;
use wasm_bindgen::JsCast;

/// Drop target types
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DropTarget<K> {
    /// Drop on a row (take over its slot)
    Row(K),
    /// Drop on a zone between rows (insert before the row at this index)
    Slot(usize),
}

/// DnD state signals
pub struct DndSignals<K: 'static> {
    pub dragging_id_read: ReadSignal<Option<K>>,
    pub dragging_id_write: WriteSignal<Option<K>>,
    pub drop_target_read: ReadSignal<Option<DropTarget<K>>>,
    pub drop_target_write: WriteSignal<Option<DropTarget<K>>>,
    pub drag_just_ended_read: ReadSignal<bool>,
    pub drag_just_ended_write: WriteSignal<bool>,
    /// Pending key (mousedown but not yet dragging)
    pub pending_id_read: ReadSignal<Option<K>>,
    pub pending_id_write: WriteSignal<Option<K>>,
    /// Start position for movement detection
    pub start_x_read: ReadSignal<i32>,
    pub start_x_write: WriteSignal<i32>,
    pub start_y_read: ReadSignal<i32>,
    pub start_y_write: WriteSignal<i32>,
}

impl<K: 'static> Clone for DndSignals<K> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K: 'static> Copy for DndSignals<K> {}

/// Movement threshold in pixels to start dragging
const DRAG_THRESHOLD_PX: i32 = 5;

pub fn create_dnd_signals<K>() -> DndSignals<K>
where
    K: Copy + Send + Sync + 'static,
{
    let (dragging_id_read, dragging_id_write) = signal(None::<K>);
    let (drop_target_read, drop_target_write) = signal(None::<DropTarget<K>>);
    let (drag_just_ended_read, drag_just_ended_write) = signal(false);
    let (pending_id_read, pending_id_write) = signal(None::<K>);
    let (start_x_read, start_x_write) = signal(0i32);
    let (start_y_read, start_y_write) = signal(0i32);
    DndSignals {
        dragging_id_read,
        dragging_id_write,
        drop_target_read,
        drop_target_write,
        drag_just_ended_read,
        drag_just_ended_write,
        pending_id_read,
        pending_id_write,
        start_x_read,
        start_x_write,
        start_y_read,
        start_y_write,
    }
}

/// Compute the order that results from dropping `dragged` on `target`.
///
/// Returns `None` when `dragged` is not in `order` or the drop would not
/// change anything.
pub fn apply_move<K>(order: &[K], dragged: K, target: DropTarget<K>) -> Option<Vec<K>>
where
    K: Copy + PartialEq,
{
    let from = order.iter().position(|k| *k == dragged)?;
    let mut next: Vec<K> = order.to_vec();
    next.remove(from);

    let insert_at = match target {
        DropTarget::Row(row) => {
            if row == dragged {
                return None;
            }
            order.iter().position(|k| *k == row)?
        }
        DropTarget::Slot(slot) => {
            let slot = slot.min(order.len());
            if slot > from { slot - 1 } else { slot }
        }
    };
    next.insert(insert_at.min(next.len()), dragged);

    if next.as_slice() == order {
        None
    } else {
        Some(next)
    }
}

/// End drag operation
pub fn end_drag<K>(dnd: &DndSignals<K>)
where
    K: Send + Sync + 'static,
{
    dnd.dragging_id_write.set(None);
    dnd.drop_target_write.set(None);
    dnd.pending_id_write.set(None);
    dnd.drag_just_ended_write.set(true);

    if let Some(win) = web_sys::window() {
        let clear = dnd.drag_just_ended_write;
        let cb = wasm_bindgen::closure::Closure::<dyn FnMut()>::new(move || {
            clear.set(false);
        });
        let _ = win.set_timeout_with_callback_and_timeout_and_arguments_0(cb.as_ref().unchecked_ref(), 100);
        cb.forget();
    }
}

/// Create mousedown handler for drag handles
/// Records pending drag with start position
pub fn make_on_mousedown<K>(dnd: DndSignals<K>, key: K) -> impl Fn(web_sys::MouseEvent) + Copy + 'static
where
    K: Copy + Send + Sync + 'static,
{
    move |ev: web_sys::MouseEvent| {
        if ev.button() == 0 {
            // Ignore if target is input or button
            if let Some(target) = ev.target() {
                if target.dyn_ref::<web_sys::HtmlInputElement>().is_some() { return; }
                if target.dyn_ref::<web_sys::HtmlButtonElement>().is_some() { return; }
            }
            // Keep the browser from starting a text selection
            ev.prevent_default();
            dnd.pending_id_write.set(Some(key));
            dnd.start_x_write.set(ev.client_x());
            dnd.start_y_write.set(ev.client_y());
        }
    }
}

/// Create mousemove handler for document - starts drag if moved enough
pub fn bind_global_mousemove<K>(dnd: DndSignals<K>)
where
    K: Copy + Send + Sync + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mousemove = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |ev: web_sys::MouseEvent| {
        let pending = dnd.pending_id_read.get_untracked();

        // If we have a pending drag and haven't started dragging yet
        if pending.is_some() && dnd.dragging_id_read.get_untracked().is_none() {
            let dx = (ev.client_x() - dnd.start_x_read.get_untracked()).abs();
            let dy = (ev.client_y() - dnd.start_y_read.get_untracked()).abs();

            if dx > DRAG_THRESHOLD_PX || dy > DRAG_THRESHOLD_PX {
                dnd.dragging_id_write.set(pending);
            }
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mousemove", on_mousemove.as_ref().unchecked_ref());
        }
    }
    on_mousemove.forget();
}

/// Create mouseenter handler for rows
pub fn make_on_row_mouseenter<K>(dnd: DndSignals<K>, key: K) -> impl Fn(web_sys::MouseEvent) + Copy + 'static
where
    K: Copy + PartialEq + Send + Sync + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        if let Some(dragging) = dnd.dragging_id_read.get_untracked() {
            // Don't allow dropping on self
            if dragging != key {
                dnd.drop_target_write.set(Some(DropTarget::Row(key)));
            }
        }
    }
}

/// Create mouseenter handler for slots between rows.
/// `slot` is read on enter, so keyed lists can pass the row's live index.
pub fn make_on_slot_mouseenter<K, S>(dnd: DndSignals<K>, slot: S) -> impl Fn(web_sys::MouseEvent) + Copy + 'static
where
    K: Copy + Send + Sync + 'static,
    S: Fn() -> usize + Copy + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.get_untracked().is_some() {
            dnd.drop_target_write.set(Some(DropTarget::Slot(slot())));
        }
    }
}

/// Create mouseleave handler
pub fn make_on_mouseleave<K>(dnd: DndSignals<K>) -> impl Fn(web_sys::MouseEvent) + Copy + 'static
where
    K: Copy + Send + Sync + 'static,
{
    move |_ev: web_sys::MouseEvent| {
        if dnd.dragging_id_read.get_untracked().is_some() {
            dnd.drop_target_write.set(None);
        }
    }
}

/// Bind global mouseup handler for drop detection.
///
/// `current_order` is read at drop time; `on_reorder` receives the dragged
/// key and the new order, and only fires when the order actually changed.
pub fn bind_global_mouseup<K, G, F>(dnd: DndSignals<K>, current_order: G, on_reorder: F)
where
    K: Copy + PartialEq + Send + Sync + 'static,
    G: Fn() -> Vec<K> + 'static,
    F: Fn(K, Vec<K>) + 'static,
{
    use wasm_bindgen::closure::Closure;

    let on_mouseup = Closure::<dyn FnMut(web_sys::MouseEvent)>::new(move |_ev: web_sys::MouseEvent| {
        let dragging_id = dnd.dragging_id_read.get_untracked();
        let drop_target = dnd.drop_target_read.get_untracked();

        dnd.pending_id_write.set(None);
        end_drag(&dnd);

        // Only a real drag (not a click) onto a target reorders
        if let (Some(dragged), Some(target)) = (dragging_id, drop_target) {
            if let Some(next) = apply_move(&current_order(), dragged, target) {
                on_reorder(dragged, next);
            }
        }
    });

    if let Some(win) = web_sys::window() {
        if let Some(doc) = win.document() {
            let _ = doc.add_event_listener_with_callback("mouseup", on_mouseup.as_ref().unchecked_ref());
        }
    }
    on_mouseup.forget();

    // Also bind global mousemove
    bind_global_mousemove(dnd);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drop_on_row_above() {
        // Drag 3 onto 1: takes 1's slot
        let next = apply_move(&[1, 2, 3], 3, DropTarget::Row(1));
        assert_eq!(next, Some(vec![3, 1, 2]));
    }

    #[test]
    fn test_drop_on_row_below() {
        let next = apply_move(&[1, 2, 3], 1, DropTarget::Row(3));
        assert_eq!(next, Some(vec![2, 3, 1]));
    }

    #[test]
    fn test_drop_on_slots() {
        assert_eq!(apply_move(&[1, 2, 3], 2, DropTarget::Slot(0)), Some(vec![2, 1, 3]));
        assert_eq!(apply_move(&[1, 2, 3], 1, DropTarget::Slot(3)), Some(vec![2, 3, 1]));
        // Past the end clamps to the end
        assert_eq!(apply_move(&[1, 2, 3], 1, DropTarget::Slot(9)), Some(vec![2, 3, 1]));
    }

    #[test]
    fn test_noop_drops() {
        // Slots on either side of the dragged row keep the order
        assert_eq!(apply_move(&[1, 2, 3], 2, DropTarget::Slot(1)), None);
        assert_eq!(apply_move(&[1, 2, 3], 2, DropTarget::Slot(2)), None);
        assert_eq!(apply_move(&[1, 2, 3], 2, DropTarget::Row(2)), None);
        // Unknown keys
        assert_eq!(apply_move(&[1, 2, 3], 7, DropTarget::Slot(0)), None);
        assert_eq!(apply_move(&[1, 2, 3], 1, DropTarget::Row(7)), None);
    }
}
