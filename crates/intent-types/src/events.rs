use tokio::sync::broadcast;

use crate::ProofEvent;

/// Broadcast channel for prover events.
///
/// Subscribers receive every event published after they subscribe; events
/// published while nobody listens are dropped.
pub struct EventBus {
	sender: broadcast::Sender<ProofEvent>,
}

impl EventBus {
	/// Creates a bus that buffers up to `capacity` events per subscriber.
	pub fn new(capacity: usize) -> Self {
		let (sender, _) = broadcast::channel(capacity);
		Self { sender }
	}

	/// Creates a receiver for events published from now on.
	pub fn subscribe(&self) -> broadcast::Receiver<ProofEvent> {
		self.sender.subscribe()
	}

	/// Sends an event to all current subscribers.
	///
	/// Fails only when there are no subscribers.
	pub fn publish(
		&self,
		event: ProofEvent,
	) -> Result<(), broadcast::error::SendError<ProofEvent>> {
		self.sender.send(event)?;
		Ok(())
	}
}

impl Clone for EventBus {
	fn clone(&self) -> Self {
		Self {
			sender: self.sender.clone(),
		}
	}
}

impl Default for EventBus {
	fn default() -> Self {
		Self::new(1024)
	}
}
