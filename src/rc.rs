//! Single-threaded reference counting with weak references.

use crate::ucount;
use alloc::boxed::Box;
use branches::{assume, unlikely};
use core::{
    cell::Cell,
    fmt,
    hash::{Hash, Hasher},
    marker::PhantomData,
    mem::{ManuallyDrop, MaybeUninit},
    ops::Deref,
    pin::Pin,
    ptr::NonNull,
};

// Data sits at offset zero so the data address and the allocation address
// coincide, keeping `as_ptr`/`from_raw` plain casts. The value is dropped in
// place when the strong count reaches zero; the allocation outlives it while
// weak handles remain, which is why `data` is `ManuallyDrop`.
#[repr(C)]
struct RcInner<T> {
    data: ManuallyDrop<T>,
    strong: Cell<ucount>,
    // Live weak handles, plus one held collectively by the strong handles.
    weak: Cell<ucount>,
}

// Address used by `Weak::new`. No allocation is ever placed there, so it
// doubles as the "points to nothing" marker.
const DANGLING: usize = usize::MAX;

/// [`Rc<T>`] is a reference-counting pointer for single-threaded use, for
/// multi-threaded use cases you should use [`Arc<T>`][`crate::Arc<T>`].
/// [`Rc<T>`] provides shared ownership of a value of type T that is stored in
/// the heap. When you clone an Rc, it creates a new pointer to the same heap
/// allocation. When the last Rc pointer to the allocation is destroyed, the
/// stored value is also dropped at that exact moment, no matter how many
/// [`Weak`] handles still observe the allocation.
pub struct Rc<T> {
    ptr: NonNull<RcInner<T>>,
    phantom: PhantomData<Box<RcInner<T>>>,
}

impl<T> Rc<T> {
    /// Constructs a new [`Rc<T>`].
    ///
    /// # Examples
    ///
    /// ```
    /// use sharc::Rc;
    ///
    /// let tada = Rc::new("Tada!");
    /// ```
    #[inline]
    pub fn new(data: T) -> Rc<T> {
        Rc {
            // Safety: box is always not null
            ptr: unsafe {
                NonNull::new_unchecked(Box::leak(Box::new(RcInner {
                    data: ManuallyDrop::new(data),
                    strong: Cell::new(1),
                    weak: Cell::new(1),
                })))
            },
            phantom: PhantomData,
        }
    }

    #[inline(always)]
    fn inner(&self) -> &RcInner<T> {
        // SAFETY: inner is protected by the strong count, it will not get
        // released unless drop of the last owner get called.
        unsafe { self.ptr.as_ref() }
    }

    #[inline]
    fn inner_mut(&mut self) -> &mut RcInner<T> {
        // SAFETY: inner is protected by the strong count, it will not get
        // released unless drop of the last owner get called.
        unsafe { self.ptr.as_mut() }
    }

    /// Constructs a new `Pin<Rc<T>>`. If `T` does not implement `Unpin`, then
    /// `value` will be pinned in memory and unable to be moved.
    #[inline]
    #[must_use]
    pub fn pin(value: T) -> Pin<Rc<T>> {
        unsafe { Pin::new_unchecked(Rc::new(value)) }
    }

    /// Gives you a pointer to the data. The reference count stays the same and
    /// the [`Rc<T>`] isn't used up. The pointer stays valid as long as there
    /// are strong references to the [`Rc<T>`].
    ///
    /// # Examples
    ///
    /// ```
    /// use sharc::Rc;
    ///
    /// let x = Rc::new("hello".to_owned());
    /// let y = Rc::clone(&x);
    /// let x_ptr = Rc::as_ptr(&x);
    /// assert_eq!(x_ptr, Rc::as_ptr(&y));
    /// assert_eq!(unsafe { &*x_ptr }, "hello");
    /// ```
    #[inline]
    #[must_use]
    pub fn as_ptr(&self) -> *const T {
        // SAFETY: ptr is valid, as self is a valid instance of [`Rc<T>`]
        self.ptr.as_ptr() as *const T
    }

    /// Turns [`Rc<T>`] into a raw pointer, must be converted back to [`Rc<T>`]
    /// with [`Rc::from_raw`] to avoid memory leak.
    ///
    /// # Examples
    ///
    /// ```
    /// use sharc::Rc;
    ///
    /// let x = Rc::new("hello".to_owned());
    /// let x_ptr = Rc::into_raw(x);
    /// assert_eq!(unsafe { &*x_ptr }, "hello");
    /// // reconstruct Rc to drop the reference and avoid memory leaks
    /// unsafe { Rc::from_raw(x_ptr) };
    /// ```
    #[inline]
    pub fn into_raw(this: Self) -> *const T {
        let ptr = Self::as_ptr(&this);
        core::mem::forget(this);
        ptr
    }

    /// Constructs an [`Rc<T>`] from a raw pointer. The raw pointer must have
    /// been from [`Rc<U>::into_raw`] where U and T must have the same size
    /// and alignment.
    ///
    /// # Safety
    /// It's only safe to construct back references that are generated with
    /// [`Rc::into_raw`]. Converting any other pointer, even one that merely
    /// points to a valid `T`, adopts an allocation that was never counted and
    /// leads to undefined behavior.
    ///
    /// # Examples
    ///
    /// ```
    /// use sharc::Rc;
    ///
    /// let x = Rc::new("hello".to_owned());
    /// let x_ptr = Rc::into_raw(x);
    ///
    /// unsafe {
    ///     // Convert back to an [`Rc<T>`] to prevent leak.
    ///     let x = Rc::from_raw(x_ptr);
    ///     assert_eq!(&*x, "hello");
    ///
    ///     // Further calls to [`Rc::from_raw(x_ptr)`] would be memory-unsafe.
    /// }
    ///
    /// // The memory was freed when `x` went out of scope above, so `x_ptr` is now dangling!
    /// ```
    #[inline]
    pub unsafe fn from_raw(ptr: *const T) -> Self {
        // SAFETY: ptr offset is same as RcInner struct offset no recalculation
        // of offset is required
        Rc {
            ptr: NonNull::new_unchecked(ptr as *mut RcInner<T>),
            phantom: PhantomData,
        }
    }

    /// Gets the number of strong pointers to an allocation.
    ///
    /// # Examples
    ///
    /// ```
    /// use sharc::Rc;
    ///
    /// let five = Rc::new(5);
    /// let _also_five = Rc::clone(&five);
    ///
    /// assert_eq!(2, Rc::strong_count(&five));
    /// ```
    #[inline]
    #[must_use]
    pub fn strong_count(&self) -> usize {
        self.inner().strong.get() as usize
    }

    /// Gets the number of [`Weak`] pointers to an allocation.
    ///
    /// # Examples
    ///
    /// ```
    /// use sharc::Rc;
    ///
    /// let five = Rc::new(5);
    /// let weak_five = Rc::downgrade(&five);
    ///
    /// assert_eq!(1, Rc::weak_count(&five));
    /// drop(weak_five);
    /// assert_eq!(0, Rc::weak_count(&five));
    /// ```
    #[inline]
    #[must_use]
    pub fn weak_count(&self) -> usize {
        // The strong handles collectively hold one weak reference.
        self.inner().weak.get() as usize - 1
    }

    /// Creates a new [`Weak`] pointer to this allocation. The weak pointer
    /// observes the allocation without owning the value: it never delays the
    /// value's destruction, and can be upgraded back into an [`Rc<T>`] only
    /// while at least one strong pointer is still alive.
    ///
    /// # Examples
    ///
    /// ```
    /// use sharc::Rc;
    ///
    /// let five = Rc::new(5);
    /// let weak_five = Rc::downgrade(&five);
    /// assert!(weak_five.upgrade().is_some());
    /// ```
    #[inline]
    #[must_use]
    pub fn downgrade(this: &Self) -> Weak<T> {
        let weak = &this.inner().weak;
        let value = weak.get();
        unsafe { assume(value != 0) };
        let value = value.wrapping_add(1);
        // SAFETY: counter is ensured to be used in single threaded environment only
        if unlikely(value == 0) {
            panic!("reference counter overflow");
        }
        weak.set(value);
        Weak { ptr: this.ptr }
    }

    /// Compares if two [`Rc<T>`]s reference the same allocation, similar to
    /// ptr::eq. Note: The same caveats apply when comparing dyn Trait
    /// pointers.
    ///
    /// # Examples
    ///
    /// ```
    /// use sharc::Rc;
    ///
    /// let five = Rc::new(5);
    /// let same_five = Rc::clone(&five);
    /// let other_five = Rc::new(5);
    ///
    /// assert!(Rc::ptr_eq(&five, &same_five));
    /// assert!(!Rc::ptr_eq(&five, &other_five));
    /// ```
    ///
    /// [`ptr::eq`]: core::ptr::eq "ptr::eq"
    #[inline]
    #[must_use]
    pub fn ptr_eq(this: &Self, other: &Self) -> bool {
        this.ptr.as_ptr() == other.ptr.as_ptr()
    }

    // True only when no other handle of either kind can observe the
    // allocation: sole strong pointer, and the weak count is down to the
    // reference the strong side itself holds.
    #[inline]
    fn is_unique(&self) -> bool {
        self.inner().strong.get() == 1 && self.inner().weak.get() == 1
    }

    /// Returns a mutable reference to the inner value of an Rc, but only if
    /// there are no other Rc or [`Weak`] pointers to the same allocation.
    /// Returns None otherwise.
    ///
    /// # Examples
    ///
    /// ```
    /// use sharc::Rc;
    ///
    /// let mut x = Rc::new(3);
    /// *Rc::get_mut(&mut x).unwrap() = 4;
    /// assert_eq!(*x, 4);
    ///
    /// let _y = Rc::clone(&x);
    /// assert!(Rc::get_mut(&mut x).is_none());
    ///
    /// let mut z = Rc::new(5);
    /// let _w = Rc::downgrade(&z);
    /// assert!(Rc::get_mut(&mut z).is_none());
    /// ```
    #[inline]
    pub fn get_mut(this: &mut Self) -> Option<&mut T> {
        if this.is_unique() {
            // SAFETY: there is only one reference to Rc it's safe to make a
            // mutable reference
            Some(&mut this.inner_mut().data)
        } else {
            None
        }
    }

    /// Returns a mutable reference into the given `Rc` without checking if it
    /// is safe to do so.
    ///
    /// This method is faster than [`get_mut`] since it avoids any runtime
    /// checks. However, it is unsafe to use unless you can guarantee that
    /// no other `Rc` pointers to the same allocation exist and that they are
    /// not dereferenced or have active borrows for the duration
    /// of the returned borrow.
    ///
    /// # Safety
    ///
    /// You can use `get_mut_unchecked` if all of the following conditions are
    /// met:
    ///
    /// * No other `Rc` pointers to the same allocation exist.
    /// * The inner type of all `Rc` pointers is exactly the same (including
    ///   lifetimes).
    /// * No other `Rc` pointers are dereferenced or have active borrows for the
    ///   duration of the returned mutable borrow.
    ///
    /// These conditions are trivially satisfied immediately after creating a
    /// new `Rc` with `Rc::new`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sharc::Rc;
    ///
    /// let mut x = Rc::new(String::new());
    /// unsafe {
    ///     Rc::get_mut_unchecked(&mut x).push_str("foo")
    /// }
    /// assert_eq!(*x, "foo");
    /// ```
    ///
    /// [`get_mut`]: Rc::get_mut
    #[inline]
    pub unsafe fn get_mut_unchecked(this: &mut Self) -> &mut T {
        &mut this.inner_mut().data
    }

    /// If there's only one strong reference, returns the inner value. If not,
    /// returns an error with the Rc passed in.
    ///
    /// Outstanding [`Weak`] pointers do not prevent unwrapping; they expire
    /// at the moment the value is moved out, and the allocation is released
    /// once the last of them is gone.
    ///
    /// # Examples
    ///
    /// ```
    /// use sharc::Rc;
    ///
    /// let x = Rc::new(3);
    /// assert_eq!(Rc::try_unwrap(x).unwrap(), 3);
    ///
    /// let x = Rc::new(4);
    /// let _y = Rc::clone(&x);
    /// assert_eq!(*Rc::try_unwrap(x).unwrap_err(), 4);
    ///
    /// let x = Rc::new(5);
    /// let w = Rc::downgrade(&x);
    /// assert_eq!(Rc::try_unwrap(x).unwrap(), 5);
    /// assert!(w.expired());
    /// ```
    #[inline]
    pub fn try_unwrap(this: Self) -> Result<T, Self> {
        if this.inner().strong.get() != 1 {
            return Err(this);
        }
        // SAFETY: there is only one strong reference, it's safe to move the
        // value of T out. The strong count is zeroed so that weak handles
        // observe expiry, then the reference held by the strong side is
        // handed back to the weak machinery, which releases the allocation
        // once no weak handles remain.
        unsafe {
            let mut this = ManuallyDrop::new(this);
            let value = ManuallyDrop::take(&mut this.inner_mut().data);
            this.inner().strong.set(0);
            drop(Weak { ptr: this.ptr });
            Ok(value)
        }
    }

    // The non-inlined portion of `drop`. The value dies here; the allocation
    // is released through the weak side, which the strong handles hold one
    // reference on.
    unsafe fn drop_slow(&mut self) {
        ManuallyDrop::drop(&mut self.inner_mut().data);
        drop(Weak { ptr: self.ptr });
    }

    /// Extracts and returns the inner value from an `Rc` if it has exactly one
    /// strong reference.
    ///
    /// If the `Rc` has more than one strong reference, it returns `None` and
    /// drops the `Rc`.
    ///
    /// By calling `Rc::into_inner` on every clone of this `Rc`, it is
    /// guaranteed that exactly one of the calls will return the inner
    /// value. This ensures that the inner value is not dropped.
    ///
    /// Example:
    /// ```
    /// use sharc::Rc;
    ///
    /// let value = Rc::new(42);
    /// let cloned1 = Rc::clone(&value);
    /// let cloned2 = Rc::clone(&value);
    /// // it's not sole owner so it will be dropped and will return none
    /// assert!(Rc::into_inner(cloned1).is_none());
    /// // it's not sole owner so it will be dropped and will return none
    /// assert!(Rc::into_inner(value).is_none());
    /// // it is sole reference to the data so it will return the data inside
    /// assert_eq!(Rc::into_inner(cloned2).unwrap(), 42);
    /// ```
    ///
    /// This function is equivalent to `Rc::try_unwrap(this).ok()`. (Note that
    /// these are not equivalent for [`Arc`](crate::Arc), due to race
    /// conditions that do not apply to `Rc`.)
    pub fn into_inner(this: Self) -> Option<T> {
        Rc::try_unwrap(this).ok()
    }
}

impl<T: Clone> Rc<T> {
    /// If there's only one reference to T, remove it. Otherwise, make a copy of
    /// T. If rc_t is of type [`Rc<T>`], this function works like
    /// (*rc_t).clone(), but will avoid copying the value if possible.
    ///
    /// # Examples
    ///
    /// ```
    /// use sharc::Rc;
    ///
    /// let inner = String::from("test");
    /// let ptr = inner.as_ptr();
    ///
    /// let rc = Rc::new(inner);
    /// let inner = Rc::unwrap_or_clone(rc);
    /// // The inner value was not cloned
    /// assert_eq!(ptr, inner.as_ptr());
    ///
    /// let rc = Rc::new(inner);
    /// let rc2 = rc.clone();
    /// let inner = Rc::unwrap_or_clone(rc);
    /// // Because there were 2 references, we had to clone the inner value.
    /// assert_ne!(ptr, inner.as_ptr());
    /// // `rc2` is the last reference, so when we unwrap it we get back
    /// // the original `String`.
    /// let inner = Rc::unwrap_or_clone(rc2);
    /// assert_eq!(ptr, inner.as_ptr());
    /// ```
    #[inline]
    pub fn unwrap_or_clone(this: Self) -> T {
        Rc::try_unwrap(this).unwrap_or_else(|rc| (*rc).clone())
    }

    // Clones the pointed-to value into a fresh, uniquely owned allocation,
    // writing directly into pre-allocated memory.
    fn optimized_clone(&self) -> Rc<T> {
        let mut buffer: Box<MaybeUninit<RcInner<T>>> = Box::new(MaybeUninit::uninit());
        let ptr = unsafe {
            (&mut (*buffer.as_mut_ptr()).data as *mut ManuallyDrop<T>)
                .write(ManuallyDrop::new(T::clone(self)));
            (*buffer.as_mut_ptr()).strong = Cell::new(1);
            (*buffer.as_mut_ptr()).weak = Cell::new(1);
            NonNull::new_unchecked(Box::leak(buffer) as *mut _ as *mut RcInner<T>)
        };
        Rc {
            ptr,
            phantom: PhantomData,
        }
    }

    /// Returns a mutable reference to the inner value of the given `Rc`,
    /// ensuring that it has unique ownership.
    ///
    /// If there are other `Rc` or [`Weak`] pointers to the same allocation,
    /// then `make_mut` will clone the inner value to a new allocation to
    /// ensure unique ownership. This is also referred to as "clone-on-write".
    ///
    /// Unlike `get_mut`, which only returns a mutable reference if there are no
    /// other pointers to the same allocation, `make_mut` always returns a
    /// mutable reference to the unique allocation.
    ///
    /// # Examples
    ///
    /// ```
    /// use sharc::Rc;
    ///
    /// let mut data = Rc::new(5);
    ///
    /// *Rc::make_mut(&mut data) += 1;         // Won't clone anything
    /// let mut other_data = Rc::clone(&data); // Won't clone inner data
    /// *Rc::make_mut(&mut data) += 1;         // Clones inner data
    /// *Rc::make_mut(&mut data) += 1;         // Won't clone anything
    /// *Rc::make_mut(&mut other_data) *= 2;   // Won't clone anything
    ///
    /// // Now `data` and `other_data` point to different allocations.
    /// assert_eq!(*data, 8);
    /// assert_eq!(*other_data, 12);
    /// ```
    ///
    /// # See also
    ///
    /// * [`get_mut`]: Returns a mutable reference to the inner value of the
    ///   given `Rc`, but only if there are no other pointers to the same
    ///   allocation.
    /// * [`clone`]: Clones the `Rc` pointer, but not the inner value.
    ///
    /// [`get_mut`]: Rc::get_mut
    /// [`clone`]: Clone::clone
    #[inline]
    pub fn make_mut(this: &mut Rc<T>) -> &mut T {
        if !this.is_unique() {
            *this = this.optimized_clone();
        }
        unsafe { Self::get_mut_unchecked(this) }
    }
}

impl<T> Deref for Rc<T> {
    type Target = T;
    #[inline(always)]
    fn deref(&self) -> &T {
        &self.inner().data
    }
}

impl<T> From<T> for Rc<T> {
    #[inline(always)]
    fn from(value: T) -> Self {
        Rc::new(value)
    }
}

impl<T> Clone for Rc<T> {
    #[inline]
    fn clone(&self) -> Self {
        let strong = &self.inner().strong;
        let value = strong.get();
        unsafe { assume(value != 0) };
        let value = value.wrapping_add(1);
        // SAFETY: counter is ensured to be used in single threaded environment only
        if unlikely(value == 0) {
            panic!("reference counter overflow");
        }
        strong.set(value);
        Self {
            ptr: self.ptr,
            phantom: PhantomData,
        }
    }
}

impl<T> Drop for Rc<T> {
    #[inline]
    fn drop(&mut self) {
        let strong = &self.inner().strong;
        let value = strong.get();
        unsafe {
            assume(value != 0);
        }
        if value != 1 {
            strong.set(value.wrapping_sub(1));
        } else {
            // The count must read zero before the value's destructor runs, so
            // that upgrades attempted during destruction fail.
            strong.set(0);
            unsafe { self.drop_slow() };
        }
    }
}

/// `Weak<T>` is a non-owning observer of an [`Rc<T>`] allocation. It keeps
/// the allocation alive but never the value: once the last strong pointer is
/// gone, the value is dropped and every `Weak` to it is permanently
/// [`expired`](Weak::expired). Access goes through [`upgrade`](Weak::upgrade),
/// which yields a fresh owning [`Rc<T>`] only while the value still exists;
/// there is no way to reach the value through a `Weak` alone.
pub struct Weak<T> {
    ptr: NonNull<RcInner<T>>,
}

impl<T> Weak<T> {
    /// Constructs a `Weak<T>` that points to nothing. Calling
    /// [`upgrade`](Weak::upgrade) on it always returns `None`. No allocation
    /// is performed.
    ///
    /// # Examples
    ///
    /// ```
    /// use sharc::rc::Weak;
    ///
    /// let empty: Weak<i32> = Weak::new();
    /// assert!(empty.upgrade().is_none());
    /// assert!(empty.expired());
    /// ```
    #[inline]
    #[must_use]
    pub fn new() -> Weak<T> {
        Weak {
            // Safety: the sentinel address is never null
            ptr: unsafe { NonNull::new_unchecked(DANGLING as *mut RcInner<T>) },
        }
    }

    #[inline(always)]
    fn is_dangling(&self) -> bool {
        self.ptr.as_ptr() as usize == DANGLING
    }

    #[inline(always)]
    fn inner(&self) -> &RcInner<T> {
        // SAFETY: never called on a dangling handle; the allocation is kept
        // alive by this handle's own weak reference.
        unsafe { self.ptr.as_ref() }
    }

    /// Attempts to upgrade to an owning [`Rc<T>`], returning `None` if the
    /// value has already been dropped.
    ///
    /// A successful upgrade counts as a new strong pointer. Once the strong
    /// count has reached zero it can never become nonzero again, so after
    /// the first `None` every subsequent call returns `None` as well.
    ///
    /// # Examples
    ///
    /// ```
    /// use sharc::Rc;
    ///
    /// let five = Rc::new(5);
    /// let weak_five = Rc::downgrade(&five);
    ///
    /// let also_five = weak_five.upgrade().unwrap();
    /// assert_eq!(2, Rc::strong_count(&five));
    ///
    /// drop(five);
    /// drop(also_five);
    /// assert!(weak_five.upgrade().is_none());
    /// ```
    #[must_use]
    pub fn upgrade(&self) -> Option<Rc<T>> {
        if self.is_dangling() {
            return None;
        }
        let strong = &self.inner().strong;
        let value = strong.get();
        if value == 0 {
            return None;
        }
        let value = value.wrapping_add(1);
        if unlikely(value == 0) {
            panic!("reference counter overflow");
        }
        strong.set(value);
        Some(Rc {
            ptr: self.ptr,
            phantom: PhantomData,
        })
    }

    /// Returns `true` if the pointed-to value has been dropped, or if this
    /// handle was created with [`Weak::new`].
    ///
    /// # Examples
    ///
    /// ```
    /// use sharc::Rc;
    ///
    /// let five = Rc::new(5);
    /// let weak_five = Rc::downgrade(&five);
    /// assert!(!weak_five.expired());
    ///
    /// drop(five);
    /// assert!(weak_five.expired());
    /// ```
    #[inline]
    #[must_use]
    pub fn expired(&self) -> bool {
        self.strong_count() == 0
    }

    /// Gets the number of strong pointers to the allocation, `0` if the value
    /// is gone or this handle points to nothing.
    #[inline]
    #[must_use]
    pub fn strong_count(&self) -> usize {
        if self.is_dangling() {
            0
        } else {
            self.inner().strong.get() as usize
        }
    }

    /// Gets the number of `Weak` pointers to the allocation, `0` if this
    /// handle points to nothing.
    #[inline]
    #[must_use]
    pub fn weak_count(&self) -> usize {
        if self.is_dangling() {
            return 0;
        }
        let weak = self.inner().weak.get() as usize;
        if self.inner().strong.get() == 0 {
            weak
        } else {
            // Discount the reference held by the strong handles.
            weak - 1
        }
    }
}

impl<T> Clone for Weak<T> {
    #[inline]
    fn clone(&self) -> Self {
        if !self.is_dangling() {
            let weak = &self.inner().weak;
            let value = weak.get();
            unsafe { assume(value != 0) };
            let value = value.wrapping_add(1);
            if unlikely(value == 0) {
                panic!("reference counter overflow");
            }
            weak.set(value);
        }
        Self { ptr: self.ptr }
    }
}

impl<T> Drop for Weak<T> {
    #[inline]
    fn drop(&mut self) {
        if self.is_dangling() {
            return;
        }
        let weak = &self.inner().weak;
        let value = weak.get();
        unsafe {
            assume(value != 0);
        }
        if value != 1 {
            weak.set(value.wrapping_sub(1));
        } else {
            // Last handle of any kind; the value itself died when the strong
            // count reached zero, so only the allocation is released here.
            // `data` is ManuallyDrop, dropping the box does not touch it.
            unsafe {
                let _ = Box::from_raw(self.ptr.as_ptr());
            }
        }
    }
}

impl<T> Default for Weak<T> {
    #[inline]
    fn default() -> Weak<T> {
        Weak::new()
    }
}

impl<T> fmt::Debug for Weak<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("(Weak)")
    }
}

impl<T: Hash> Hash for Rc<T> {
    #[inline]
    fn hash<H: Hasher>(&self, state: &mut H) {
        (**self).hash(state);
    }
}

impl<T: fmt::Display> fmt::Display for Rc<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&**self, f)
    }
}

impl<T: fmt::Debug> fmt::Debug for Rc<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(&**self, f)
    }
}

impl<T> fmt::Pointer for Rc<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Pointer::fmt(&(&**self as *const T), f)
    }
}

impl<T: Default> Default for Rc<T> {
    #[inline]
    fn default() -> Rc<T> {
        Rc::new(Default::default())
    }
}

impl<T: PartialEq> PartialEq for Rc<T> {
    #[inline]
    fn eq(&self, other: &Rc<T>) -> bool {
        self.deref().eq(other)
    }
}

impl<T: Eq> Eq for Rc<T> {}

impl<T: PartialOrd> PartialOrd for Rc<T> {
    #[inline]
    fn partial_cmp(&self, other: &Rc<T>) -> Option<core::cmp::Ordering> {
        (**self).partial_cmp(&**other)
    }

    #[inline]
    fn lt(&self, other: &Rc<T>) -> bool {
        **self < **other
    }

    #[inline]
    fn le(&self, other: &Rc<T>) -> bool {
        **self <= **other
    }

    #[inline]
    fn gt(&self, other: &Rc<T>) -> bool {
        **self > **other
    }

    #[inline]
    fn ge(&self, other: &Rc<T>) -> bool {
        **self >= **other
    }
}

impl<T: Ord> Ord for Rc<T> {
    #[inline]
    fn cmp(&self, other: &Rc<T>) -> core::cmp::Ordering {
        (**self).cmp(&**other)
    }
}

/// This trait allows for a value to be borrowed as a reference to a given type.
/// It is typically used for generic code that can work with borrowed values of
/// different types.
///
/// This implementation for `Rc<T>` allows for an `Rc<T>` to be borrowed as a
/// shared reference to `T`.
impl<T> core::borrow::Borrow<T> for Rc<T> {
    #[inline(always)]
    fn borrow(&self) -> &T {
        self
    }
}

/// An implementation of the `AsRef` trait for `Rc<T>`.
///
/// This allows an `Rc<T>` to be treated as a reference to `T`.
///
/// # Examples
///
/// ```
/// use sharc::Rc;
///
/// let data = Rc::new(42);
/// let reference: &i32 = data.as_ref();
/// assert_eq!(*reference, 42);
/// ```
impl<T> AsRef<T> for Rc<T> {
    #[inline(always)]
    fn as_ref(&self) -> &T {
        self
    }
}

impl<T> Unpin for Rc<T> {}
