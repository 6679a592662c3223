use parking_lot::{Mutex, MutexGuard};

static CODEC_LOCK: Mutex<()> = Mutex::new(());

/// Serialize tests that read or replace the process-wide codec.
pub(crate) fn codec_lock() -> MutexGuard<'static, ()> {
	CODEC_LOCK.lock()
}
