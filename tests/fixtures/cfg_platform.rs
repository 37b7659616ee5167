#[cfg(all(unix, feature = "x11"))]
#[repr(u32)]
pub enum FooType {
    A,
    B,
    C,
}

#[cfg(any(windows, target_pointer_width = "32"))]
#[repr(u32)]
pub enum BarType {
    A,
    B,
    C,
}

#[cfg(all(unix, feature = "x11"))]
#[repr(C)]
pub struct FooHandle {
    ty: FooType,
    x: i32,
    y: f32,
}

#[cfg(any(windows, target_pointer_width = "32"))]
#[repr(C)]
pub struct BarHandle {
    ty: BarType,
    x: i32,
    y: f32,
}

#[cfg(all(unix, feature = "x11"))]
#[unsafe(no_mangle)]
pub extern "C" fn root(a: FooHandle) {}

#[cfg(any(windows, target_pointer_width = "32"))]
#[unsafe(no_mangle)]
pub extern "C" fn root(a: BarHandle) {}
