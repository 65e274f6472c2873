//! Error codes and per-thread error messages for the C ABI
//!
//! Every FFI entry point returns a `BenchErrorCode`. On failure the full
//! message is stored in thread-local storage and can be fetched with
//! `thermal_bench_last_error_message` from the same thread.

use std::cell::RefCell;
use std::ffi::CString;
use std::os::raw::c_char;
use std::ptr;

/// Status of an FFI call.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BenchErrorCode {
    Ok = 0,
    /// A required pointer parameter was null
    NullPointer = 1,
    /// A parameter value was rejected
    InvalidArgument = 2,
    /// A string parameter was not valid UTF-8
    InvalidUtf8 = 3,
    /// The scene JSON could not be parsed
    SceneParse = 4,
    /// The grid could not be built from the scene
    GridBuild = 5,
    /// The engine has not been initialized yet
    NotInitialized = 6,
    /// No sample with the given id exists
    UnknownSample = 7,
    /// The caller-provided buffer is too small
    BufferTooSmall = 8,
    /// The instance lock was poisoned by a panic in another thread
    LockPoisoned = 9,
    /// A panic was caught at the FFI boundary
    InternalPanic = 10,
}

/// An error carried to the FFI boundary: a code plus a diagnostic message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct BenchError {
    code: BenchErrorCode,
    msg: String,
}

impl BenchError {
    pub(crate) fn code(&self) -> BenchErrorCode {
        self.code
    }

    pub(crate) fn msg(&self) -> &str {
        &self.msg
    }

    /// Null pointer passed where non-null is required.
    pub(crate) fn null_pointer(param_name: &str) -> Self {
        BenchError {
            code: BenchErrorCode::NullPointer,
            msg: format!("Parameter '{param_name}' cannot be null"),
        }
    }

    pub(crate) fn invalid_argument(msg: impl Into<String>) -> Self {
        BenchError {
            code: BenchErrorCode::InvalidArgument,
            msg: msg.into(),
        }
    }

    pub(crate) fn invalid_utf8(param_name: &str) -> Self {
        BenchError {
            code: BenchErrorCode::InvalidUtf8,
            msg: format!("Parameter '{param_name}' is not valid UTF-8"),
        }
    }

    pub(crate) fn scene_parse(msg: impl Into<String>) -> Self {
        BenchError {
            code: BenchErrorCode::SceneParse,
            msg: msg.into(),
        }
    }

    pub(crate) fn grid_build(msg: impl Into<String>) -> Self {
        BenchError {
            code: BenchErrorCode::GridBuild,
            msg: msg.into(),
        }
    }

    pub(crate) fn not_initialized() -> Self {
        BenchError {
            code: BenchErrorCode::NotInitialized,
            msg: String::from("Engine has no grid yet; call thermal_bench_initialize_scene first"),
        }
    }

    pub(crate) fn unknown_sample(id: u32) -> Self {
        BenchError {
            code: BenchErrorCode::UnknownSample,
            msg: format!("No sample with id {id}"),
        }
    }

    pub(crate) fn buffer_too_small(needed: usize, got: usize) -> Self {
        BenchError {
            code: BenchErrorCode::BufferTooSmall,
            msg: format!("Buffer holds {got} values, {needed} required"),
        }
    }

    pub(crate) fn lock_poisoned() -> Self {
        BenchError {
            code: BenchErrorCode::LockPoisoned,
            msg: String::from("Instance lock was poisoned by a panic in another thread"),
        }
    }

    pub(crate) fn internal_panic() -> Self {
        BenchError {
            code: BenchErrorCode::InternalPanic,
            msg: String::from("Panic caught at the FFI boundary"),
        }
    }
}

thread_local! {
    static LAST_ERROR: RefCell<(Option<CString>, BenchErrorCode)> =
        const { RefCell::new((None, BenchErrorCode::Ok)) };
}

pub(crate) fn with_last_error_mut<R>(f: impl FnOnce(&mut (Option<CString>, BenchErrorCode)) -> R) -> R {
    LAST_ERROR.with(|slot| f(&mut slot.borrow_mut()))
}

/// Message of the last error raised on this thread, or null when the last
/// call succeeded. The pointer stays valid until the next failing call on
/// the same thread; do not free it.
#[no_mangle]
pub extern "C" fn thermal_bench_last_error_message() -> *const c_char {
    with_last_error_mut(|(cstring, _)| {
        cstring.as_ref().map_or(ptr::null(), |msg| msg.as_ptr())
    })
}

/// Code of the last error raised on this thread.
#[no_mangle]
pub extern "C" fn thermal_bench_last_error_code() -> BenchErrorCode {
    with_last_error_mut(|(_, code)| *code)
}
