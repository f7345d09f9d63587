use crate::incident::Incident;

/// Priority queue of pending incidents.
///
/// An array-backed binary max-heap ordered by the derived priority score, so
/// the most urgent incident is always at the root. Parent/child navigation is
/// plain index arithmetic on the backing vector: the parent of slot `i` is
/// `(i - 1) / 2`, its children are `2i + 1` and `2i + 2`.
///
/// Ties between equal priorities are broken arbitrarily; heap restructuring
/// does not keep equal-priority incidents in insertion order.
#[derive(Debug, Default)]
pub struct IncidentQueue {
    heap: Vec<Incident>,
}

impl IncidentQueue {
    pub fn new() -> Self {
        IncidentQueue { heap: Vec::new() }
    }

    pub fn len(&self) -> usize {
        self.heap.len()
    }

    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// The most urgent incident without removing it.
    pub fn peek(&self) -> Option<&Incident> {
        self.heap.first()
    }

    /// Inserts an incident, restoring the heap invariant by sifting the new
    /// element up until its parent has equal or higher priority.
    pub fn insert(&mut self, incident: Incident) {
        self.heap.push(incident);
        self.sift_up(self.heap.len() - 1);
    }

    /// Removes and returns the most urgent incident.
    ///
    /// `None` means the queue is empty. That is a normal condition for
    /// callers to branch on, not a fault.
    pub fn extract_max(&mut self) -> Option<Incident> {
        if self.heap.is_empty() {
            return None;
        }
        // Move the last element into the root slot, then sink it.
        let max = self.heap.swap_remove(0);
        if !self.heap.is_empty() {
            self.sift_down(0);
        }
        Some(max)
    }

    /// Read-only view of all pending incidents, sorted by priority
    /// descending. Does not disturb the heap order.
    pub fn snapshot(&self) -> Vec<Incident> {
        let mut incidents = self.heap.clone();
        incidents.sort_by(|a, b| b.priority.cmp(&a.priority));
        incidents
    }

    fn sift_up(&mut self, mut index: usize) {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self.heap[parent].priority >= self.heap[index].priority {
                break;
            }
            self.heap.swap(parent, index);
            index = parent;
        }
    }

    fn sift_down(&mut self, mut index: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * index + 1;
            let right = 2 * index + 2;
            let mut largest = index;

            if left < len && self.heap[left].priority > self.heap[largest].priority {
                largest = left;
            }
            if right < len && self.heap[right].priority > self.heap[largest].priority {
                largest = right;
            }
            if largest == index {
                break;
            }
            self.heap.swap(index, largest);
            index = largest;
        }
    }
}
