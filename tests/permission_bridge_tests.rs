//! Integration tests for the microphone permission bridge
//!
//! Tests focus on:
//! - Reply delivery on the owner's execution context across real threads
//! - Exactly-one-reply semantics with concurrent in-flight requests
//! - Silent drop when the owner is torn down mid-request
//! - Status translation and the not-implemented sentinel

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{mpsc, Arc, Mutex, Weak};
use std::thread;
use std::time::Duration;

use fisiomap_lib::permissions::{
    methods, status_code, MethodReply, MicPermission, MicrophoneBridge, MicrophonePermission,
    ReplyContext, ReplyValue,
};

/// Single-threaded task loop standing in for the app's main thread.
struct MainLoop {
    tasks: mpsc::Sender<Box<dyn FnOnce() + Send>>,
    thread_id: thread::ThreadId,
}

impl MainLoop {
    fn spawn() -> (Arc<MainLoop>, thread::JoinHandle<()>) {
        let (task_tx, task_rx) = mpsc::channel::<Box<dyn FnOnce() + Send>>();
        let (id_tx, id_rx) = mpsc::channel();

        let handle = thread::spawn(move || {
            id_tx.send(thread::current().id()).unwrap();
            while let Ok(task) = task_rx.recv() {
                task();
            }
        });

        let thread_id = id_rx.recv().unwrap();
        (
            Arc::new(MainLoop {
                tasks: task_tx,
                thread_id,
            }),
            handle,
        )
    }
}

impl ReplyContext for MainLoop {
    fn run(&self, task: Box<dyn FnOnce() + Send>) {
        let _ = self.tasks.send(task);
    }
}

/// Provider whose prompt outcome is released manually by the test. The
/// completions run on a background thread, the way the OS prompt calls
/// back on a queue of its own choosing.
struct PromptProvider {
    status: i32,
    pending: Mutex<Vec<Box<dyn FnOnce(bool) + Send>>>,
    request_calls: AtomicUsize,
}

impl PromptProvider {
    fn new(status: i32) -> Arc<Self> {
        Arc::new(Self {
            status,
            pending: Mutex::new(Vec::new()),
            request_calls: AtomicUsize::new(0),
        })
    }

    /// Complete every pending request on a background thread and wait for
    /// those completions to finish running.
    fn release(&self, grant: bool) {
        let completions: Vec<_> = self.pending.lock().unwrap().drain(..).collect();
        thread::spawn(move || {
            for completion in completions {
                completion(grant);
            }
        })
        .join()
        .unwrap();
    }
}

impl MicrophonePermission for PromptProvider {
    fn record_permission(&self) -> i32 {
        self.status
    }

    fn request_record_permission(&self, on_complete: Box<dyn FnOnce(bool) + Send + 'static>) {
        self.request_calls.fetch_add(1, Ordering::SeqCst);
        self.pending.lock().unwrap().push(on_complete);
    }
}

fn bridge_for(
    provider: Arc<dyn MicrophonePermission>,
    main_loop: &Arc<MainLoop>,
) -> MicrophoneBridge {
    let owner: Weak<dyn ReplyContext> = Arc::downgrade(main_loop);
    MicrophoneBridge::new(provider, owner)
}

#[test]
fn test_async_reply_arrives_on_owner_thread() {
    let (main_loop, handle) = MainLoop::spawn();
    let provider = PromptProvider::new(status_code::UNDETERMINED);
    let bridge = bridge_for(provider.clone(), &main_loop);

    let (tx, rx) = mpsc::channel();
    let reply = MethodReply::new(move |value| {
        tx.send((value, thread::current().id())).unwrap();
    });

    bridge.dispatch(methods::REQUEST_MICROPHONE_PERMISSION, reply);
    provider.release(true);

    let (value, observed_thread) = rx.recv_timeout(Duration::from_secs(2)).unwrap();
    assert_eq!(value, ReplyValue::Granted(true));
    assert_eq!(observed_thread, main_loop.thread_id);

    drop(bridge);
    drop(main_loop);
    handle.join().unwrap();
}

#[test]
fn test_concurrent_requests_each_get_exactly_one_reply() {
    let (main_loop, handle) = MainLoop::spawn();
    let provider = PromptProvider::new(status_code::UNDETERMINED);
    let bridge = bridge_for(provider.clone(), &main_loop);

    let replies = Arc::new(AtomicUsize::new(0));
    let (tx, rx) = mpsc::channel();

    for _ in 0..3 {
        let replies = replies.clone();
        let tx = tx.clone();
        bridge.dispatch(
            methods::REQUEST_MICROPHONE_PERMISSION,
            MethodReply::new(move |value| {
                replies.fetch_add(1, Ordering::SeqCst);
                tx.send(value).unwrap();
            }),
        );
    }

    assert_eq!(provider.request_calls.load(Ordering::SeqCst), 3);
    provider.release(false);

    for _ in 0..3 {
        let value = rx.recv_timeout(Duration::from_secs(2)).unwrap();
        assert_eq!(value, ReplyValue::Granted(false));
    }

    // No extra replies show up afterwards
    assert!(rx.recv_timeout(Duration::from_millis(100)).is_err());
    assert_eq!(replies.load(Ordering::SeqCst), 3);

    drop(bridge);
    drop(main_loop);
    handle.join().unwrap();
}

#[test]
fn test_owner_torn_down_mid_request_drops_reply_without_crash() {
    let (main_loop, handle) = MainLoop::spawn();
    let provider = PromptProvider::new(status_code::UNDETERMINED);
    let bridge = bridge_for(provider.clone(), &main_loop);

    let (tx, rx) = mpsc::channel();
    let reply = MethodReply::new(move |value| {
        let _ = tx.send(value);
    });

    bridge.dispatch(methods::REQUEST_MICROPHONE_PERMISSION, reply);

    // Tear down the owner before the prompt completes
    drop(main_loop);
    handle.join().unwrap();
    provider.release(true);

    // No reply is ever delivered
    assert!(rx.recv_timeout(Duration::from_millis(200)).is_err());
}

#[test]
fn test_check_translates_provider_status() {
    let (main_loop, _handle) = MainLoop::spawn();

    for (code, expected) in [
        (status_code::GRANTED, MicPermission::Granted),
        (status_code::DENIED, MicPermission::Denied),
        (status_code::UNDETERMINED, MicPermission::Undetermined),
        (7, MicPermission::Undetermined),
    ] {
        let bridge = bridge_for(PromptProvider::new(code), &main_loop);

        let (tx, rx) = mpsc::channel();
        bridge.dispatch(
            methods::CHECK_MICROPHONE_PERMISSION,
            MethodReply::new(move |value| tx.send(value).unwrap()),
        );

        // Synchronous path: the reply is already there
        assert_eq!(rx.try_recv().unwrap(), ReplyValue::Status(expected));
    }
}

#[test]
fn test_unknown_method_gets_sentinel_and_no_provider_call() {
    let (main_loop, _handle) = MainLoop::spawn();
    let provider = PromptProvider::new(status_code::GRANTED);
    let bridge = bridge_for(provider.clone(), &main_loop);

    let (tx, rx) = mpsc::channel();
    bridge.dispatch(
        "someOtherMethod",
        MethodReply::new(move |value| tx.send(value).unwrap()),
    );

    assert_eq!(rx.try_recv().unwrap(), ReplyValue::NotImplemented);
    assert_eq!(provider.request_calls.load(Ordering::SeqCst), 0);
}
