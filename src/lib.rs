#![no_std]
//! # Sharc: small and fast reference counting with weak references
//!
//! Sharc is a lightweight reference-counting library for Rust that serves as
//! an alternative to the standard library's reference counting. It offers
//! both multi-threaded ([`Arc<T>`]) and single-threaded ([`Rc<T>`]) shared
//! ownership, together with the companion non-owning [`rc::Weak`] and
//! [`arc::Weak`] handles. When you clone an owning pointer, it shares the
//! same heap allocation and bumps the strong count; when the last owning
//! pointer is destroyed, the stored value is dropped at that exact moment.
//! Weak handles observe the allocation without keeping the value alive:
//! they can be upgraded back to an owning pointer only while at least one
//! owner still exists, which is what makes them suitable for breaking
//! ownership cycles, caches, and observer lists.
//!
//! ## Why use Sharc?
//!
//! - Drop-in API compatibility with `std::sync::Arc` and `std::rc::Rc`,
//!   including weak references
//! - Counters sized to the platform, with less memory overhead than the
//!   standard library on 64-bit targets
//! - Deterministic, synchronous destruction: the value dies with the last
//!   owner, the allocation dies with the last handle of either kind
//! - It supports `no_std` with extern alloc
//!
//! ## Why not use Sharc?
//!
//! - It does not support data as DSTs
//! - With Sharc in 64-bit systems, you only can have `4,294,967,296 - 256`
//!   live references to an object. If you need more than that, use the
//!   standard library. In other systems with smaller pointer sizes like
//!   32-bit, you will have `usize::MAX` live references limitation that is
//!   the same as the standard library.
//!
//! ## Cycles
//!
//! Reference counting does not detect cycles: two values that own each
//! other through strong pointers keep each other alive forever. Break the
//! loop by making one direction a weak handle and upgrading it on access:
//!
//! ```
//! use sharc::Rc;
//! use sharc::rc::Weak;
//!
//! let parent = Rc::new("parent");
//! let child_view: Weak<&str> = Rc::downgrade(&parent);
//!
//! assert_eq!(child_view.upgrade().as_deref(), Some(&"parent"));
//! drop(parent);
//! assert!(child_view.upgrade().is_none());
//! ```
//!
//! ### Features
//!
//! By default, Sharc uses a counter size of half the word size for 64-bit
//! systems, with the `usize-for-small-platforms` feature enabled. This is
//! because overflowing a 32-bit counter is harder compared to overflowing
//! 16-bit counters. If you wish to use the half register size on other
//! platforms, you can disable the default features by setting
//! `default-features = false`. This will result in the use of 16-bit
//! counters on 32-bit platforms and 8-bit counters on 16-bit platforms.

#![warn(missing_docs, missing_debug_implementations)]
extern crate alloc;

// Arc counter definition

#[cfg(target_pointer_width = "64")]
pub(crate) use core::sync::atomic::AtomicU32 as AtomicCounter;

#[cfg(all(
    not(target_pointer_width = "64"),
    not(target_pointer_width = "16"),
    not(target_pointer_width = "8"),
    feature = "usize-for-small-platforms",
))]
pub(crate) use core::sync::atomic::AtomicUsize as AtomicCounter;

#[cfg(all(
    target_pointer_width = "32",
    not(feature = "usize-for-small-platforms")
))]
pub(crate) use core::sync::atomic::AtomicU16 as AtomicCounter;

// Rc counter definition

#[cfg(target_pointer_width = "64")]
pub(crate) use u32 as ucount;

#[cfg(all(
    not(target_pointer_width = "64"),
    feature = "usize-for-small-platforms"
))]
pub(crate) use usize as ucount;

#[cfg(all(
    target_pointer_width = "32",
    not(feature = "usize-for-small-platforms")
))]
pub(crate) use u16 as ucount;

#[cfg(all(
    target_pointer_width = "16",
    not(feature = "usize-for-small-platforms")
))]
pub(crate) use u8 as ucount;

#[cfg(all(target_pointer_width = "8", not(feature = "usize-for-small-platforms")))]
pub(crate) use usize as ucount;

#[cfg(all(not(target_pointer_width = "16"), not(target_pointer_width = "8")))]
pub mod arc;
pub mod rc;

// `rc::Weak` and `arc::Weak` share a name, like the standard library's
// `rc`/`sync` pair, so only the owning types are re-exported at the root.
#[cfg(all(not(target_pointer_width = "16"), not(target_pointer_width = "8")))]
pub use arc::Arc;
pub use rc::Rc;
