//! Internal helpers shared by the FFI entry points

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};

use crate::error::{with_last_error_mut, BenchError, BenchErrorCode};

/// Record an error in thread-local storage.
pub(crate) fn set_last_error(error: &BenchError) {
    with_last_error_mut(|(cstring, code)| {
        *cstring = CString::new(error.msg()).ok();
        *code = error.code();
    });
}

/// Record an error and return its code.
#[inline]
pub(crate) fn track_error(error: &BenchError) -> BenchErrorCode {
    set_last_error(error);
    error.code()
}

/// Clear the thread-local error after a successful call.
pub(crate) fn clear_last_error() -> BenchErrorCode {
    with_last_error_mut(|(cstring, code)| {
        *cstring = None;
        *code = BenchErrorCode::Ok;
    });
    BenchErrorCode::Ok
}

/// Run an entry-point body, converting panics into `InternalPanic` instead
/// of unwinding across the C boundary.
pub(crate) fn guard(f: impl FnOnce() -> BenchErrorCode) -> BenchErrorCode {
    match catch_unwind(AssertUnwindSafe(f)) {
        Ok(code) => code,
        Err(_) => track_error(&BenchError::internal_panic()),
    }
}

/// Borrow a UTF-8 string parameter.
///
/// # Safety
/// `ptr` must be null or point to a valid NUL-terminated C string.
pub(crate) unsafe fn str_param<'a>(
    ptr: *const c_char,
    param_name: &str,
) -> Result<&'a str, BenchError> {
    if ptr.is_null() {
        return Err(BenchError::null_pointer(param_name));
    }
    CStr::from_ptr(ptr)
        .to_str()
        .map_err(|_| BenchError::invalid_utf8(param_name))
}

/// Write a value through an out-pointer.
///
/// # Safety
/// `ptr` must be null or valid for a write of `T`.
pub(crate) unsafe fn write_out<T>(
    ptr: *mut T,
    value: T,
    param_name: &str,
) -> Result<(), BenchError> {
    if ptr.is_null() {
        return Err(BenchError::null_pointer(param_name));
    }
    ptr.write(value);
    Ok(())
}
