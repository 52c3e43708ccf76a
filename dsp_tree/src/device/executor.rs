use std::sync::mpsc::{sync_channel, Receiver, SyncSender, TrySendError};
use std::sync::{Arc, Mutex};

use futures::future::{BoxFuture, FutureExt};
use futures::task::{waker_ref, ArcWake, Context};
use futures::Future;

use crate::error::{Error, Result};

pub fn spawn_and_execute(fifo_size: usize) -> (KernelSpawner, KernelExecutor) {
  let (sender, receiver) = sync_channel(fifo_size);
  let spawner = KernelSpawner { sender };
  let executor = KernelExecutor { tasks: receiver };
  (spawner, executor)
}

#[derive(Clone)]
pub struct KernelSpawner {
  sender: SyncSender<Arc<KernelTask>>,
}

impl KernelSpawner {
  pub fn push(&self, future: impl Future<Output = ()> + 'static + Send) -> Result<()> {
    let future = Mutex::new(Some(future.boxed()));

    let task = Arc::new(KernelTask { future, sender: self.sender.clone() });
    self.sender.try_send(task).map_err(|err| match err {
      TrySendError::Full(_) => Error::QueueFull,
      TrySendError::Disconnected(_) => Error::KernelAborted,
    })
  }
}

pub struct KernelExecutor {
  tasks: Receiver<Arc<KernelTask>>,
}

impl KernelExecutor {
  /// Polls queued kernels until none is ready to make progress.
  pub fn run_pending(&self) -> usize {
    let mut polled = 0;
    while let Ok(task) = self.tasks.try_recv() {
      polled += 1;
      let mut future_slot = task.future.lock().unwrap();
      if let Some(mut future) = future_slot.take() {
        let waker = waker_ref(&task);
        let context = &mut Context::from_waker(&waker);
        if future.as_mut().poll(context).is_pending() {
          *future_slot = Some(future);
        }
      }
    }
    polled
  }
}

pub struct KernelTask {
  future: Mutex<Option<BoxFuture<'static, ()>>>,
  sender: SyncSender<Arc<KernelTask>>,
}

impl ArcWake for KernelTask {
  fn wake_by_ref(arc_self: &Arc<Self>) {
    let cloned = arc_self.clone();
    arc_self.sender.try_send(cloned).expect("kernel FIFO full on wake");
  }
}
