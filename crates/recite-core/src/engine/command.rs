//! Lock-free command queue for the playback engine
//!
//! The session (control thread) sends commands via a lock-free SPSC queue;
//! the audio thread pops them at the start of each callback. Neither side
//! ever blocks, so a slow control thread cannot cause an audio dropout and
//! the audio thread never takes a lock.

use super::schedule::Program;

/// Queue capacity. Commands are tiny and the session sends a handful per
/// playback action; 64 slots is ample headroom.
const COMMAND_QUEUE_CAPACITY: usize = 64;

/// Commands sent from the session to the audio thread.
#[derive(Debug)]
pub enum EngineCommand {
    /// Replace any current program with a new one, resetting the playhead.
    ///
    /// Boxed because the program carries all decoded sample data; the enum
    /// itself stays pointer-sized for cache-efficient queueing.
    Load(Box<Program>),
    /// Start or resume playback of the loaded program.
    Play,
    /// Pause playback, freezing the playhead in place.
    Pause,
}

/// Create a command channel for engine control.
pub fn command_channel() -> (CommandSender, CommandReceiver) {
    let (producer, consumer) = rtrb::RingBuffer::new(COMMAND_QUEUE_CAPACITY);
    (CommandSender { producer }, CommandReceiver { consumer })
}

/// Control-thread end of the command queue. Non-blocking sends.
#[derive(Debug)]
pub struct CommandSender {
    producer: rtrb::Producer<EngineCommand>,
}

impl CommandSender {
    /// Send a command to the engine.
    ///
    /// Returns `Err(cmd)` with the command handed back if the queue is full.
    pub fn send(&mut self, cmd: EngineCommand) -> Result<(), EngineCommand> {
        self.producer.push(cmd).map_err(|e| match e {
            rtrb::PushError::Full(value) => value,
        })
    }
}

/// Audio-thread end of the command queue.
pub struct CommandReceiver {
    consumer: rtrb::Consumer<EngineCommand>,
}

impl CommandReceiver {
    /// Pop the next pending command, if any.
    pub fn pop(&mut self) -> Option<EngineCommand> {
        self.consumer.pop().ok()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn commands_arrive_in_order() {
        let (mut tx, mut rx) = command_channel();
        tx.send(EngineCommand::Play).unwrap();
        tx.send(EngineCommand::Pause).unwrap();

        assert!(matches!(rx.pop(), Some(EngineCommand::Play)));
        assert!(matches!(rx.pop(), Some(EngineCommand::Pause)));
        assert!(rx.pop().is_none());
    }
}
