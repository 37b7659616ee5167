#[cfg(any(feature = "not_defined", feature = "defined"))]
#[repr(C)]
pub struct Foo {
    x: i32,
}

#[cfg(feature = "not_defined")]
#[repr(C)]
pub struct Bar {
    y: Foo,
}

#[cfg(feature = "defined")]
#[repr(C)]
pub struct Bar {
    z: Foo,
}

#[repr(C)]
pub struct Root {
    w: Bar,
}

#[unsafe(no_mangle)]
pub extern "C" fn root(a: Root) {}
