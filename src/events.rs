use kurbo::Point;

/// Input events as delivered by the host shell, processed strictly in
/// delivery order. Handlers must stay O(1); high-frequency pointer/scroll
/// streams are not coalesced here.
#[derive(Clone, Copy, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Event {
    PointerMove { x: f64, y: f64 },
    PointerEnter { x: f64, y: f64 },
    PointerLeave,
    Click { x: f64, y: f64 },
    Scroll { y: f64 },
    Resize { width: f64, height: f64 },
    Tick { dt_s: f64 },
}

impl Event {
    pub fn pointer(&self) -> Option<Point> {
        match *self {
            Event::PointerMove { x, y }
            | Event::PointerEnter { x, y }
            | Event::Click { x, y } => Some(Point::new(x, y)),
            _ => None,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubscriptionId(u64);

/// List-based event fan-out with explicit subscribe/unsubscribe lifecycle.
///
/// Multiple effect instances can listen to the same global stream at once;
/// a singleton callback would drop all but the last. `len` is observable so
/// teardown tests can assert nothing leaked.
pub struct Dispatcher<E> {
    subscribers: Vec<(SubscriptionId, Box<dyn FnMut(&E)>)>,
    next_id: u64,
}

impl<E> Dispatcher<E> {
    pub fn new() -> Self {
        Self {
            subscribers: Vec::new(),
            next_id: 0,
        }
    }

    pub fn subscribe(&mut self, handler: impl FnMut(&E) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.subscribers.push((id, Box::new(handler)));
        id
    }

    /// Removes a listener. Idempotent: unsubscribing twice is a no-op.
    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        let before = self.subscribers.len();
        self.subscribers.retain(|(sid, _)| *sid != id);
        self.subscribers.len() != before
    }

    /// Delivers one event to every live subscriber, in subscription order.
    pub fn emit(&mut self, event: &E) {
        for (_, handler) in &mut self.subscribers {
            handler(event);
        }
    }

    pub fn len(&self) -> usize {
        self.subscribers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.subscribers.is_empty()
    }
}

impl<E> Default for Dispatcher<E> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E> std::fmt::Debug for Dispatcher<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Dispatcher")
            .field("subscribers", &self.subscribers.len())
            .finish()
    }
}
