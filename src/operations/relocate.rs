use std::ops::{Deref, DerefMut};

use tracing::{debug, warn};

use crate::error::Result;
use crate::host::{Host, Mode};
use crate::math::{translation_of, Point3};

/// Scoped access to a host that puts back the 3D cursor and every object
/// mode it changed when dropped.
///
/// Restoration runs on every exit path, including early returns through
/// `?` and unwinding.
pub struct HostStateGuard<'a, H: Host> {
    host: &'a mut H,
    cursor: Point3,
    modes: Vec<(H::ObjectId, Mode)>,
}

impl<'a, H: Host> HostStateGuard<'a, H> {
    /// Records the current cursor location and takes over the host.
    pub fn acquire(host: &'a mut H) -> Self {
        let cursor = host.cursor();
        Self {
            host,
            cursor,
            modes: Vec::new(),
        }
    }

    /// Switches an object into `mode`, remembering the mode it had the
    /// first time this guard touched it.
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot read or change the mode.
    pub fn enter_mode(&mut self, id: H::ObjectId, mode: Mode) -> Result<()> {
        if !self.modes.iter().any(|(saved, _)| *saved == id) {
            let previous = self.host.mode(id)?;
            self.modes.push((id, previous));
        }
        self.host.set_mode(id, mode)
    }
}

impl<H: Host> Deref for HostStateGuard<'_, H> {
    type Target = H;

    fn deref(&self) -> &H {
        &*self.host
    }
}

impl<H: Host> DerefMut for HostStateGuard<'_, H> {
    fn deref_mut(&mut self) -> &mut H {
        &mut *self.host
    }
}

impl<H: Host> Drop for HostStateGuard<'_, H> {
    fn drop(&mut self) {
        for (id, mode) in self.modes.drain(..).rev() {
            if let Err(err) = self.host.set_mode(id, mode) {
                warn!(object = ?id, %mode, %err, "failed to restore mode");
            }
        }
        self.host.set_cursor(self.cursor);
    }
}

/// Moves object origins to given world-space points without moving their
/// geometry.
///
/// Each target is staged through the 3D cursor and the host's
/// set-origin-to-cursor primitive. Objects are put in object mode for the
/// duration; cursor and modes are restored afterwards whether or not the
/// relocation succeeded.
///
/// Relocation is all-or-nothing: if the host refuses one object, objects
/// already moved get their previous origin back before the error is
/// returned.
pub struct RelocateOrigin<Id> {
    targets: Vec<(Id, Point3)>,
}

impl<Id: Copy + Eq + std::fmt::Debug> RelocateOrigin<Id> {
    /// Creates a new `RelocateOrigin` operation.
    #[must_use]
    pub fn new(targets: Vec<(Id, Point3)>) -> Self {
        Self { targets }
    }

    /// Executes the relocation.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by the host while switching modes,
    /// reading a mesh, or moving an origin.
    pub fn execute<H: Host<ObjectId = Id>>(&self, host: &mut H) -> Result<()> {
        let mut guard = HostStateGuard::acquire(host);

        let mut previous = Vec::with_capacity(self.targets.len());
        for &(id, _) in &self.targets {
            guard.enter_mode(id, Mode::Object)?;
            previous.push(translation_of(&guard.mesh_snapshot(id)?.local_to_world));
        }

        let mut moved = Vec::with_capacity(self.targets.len());
        for (&(id, target), &prior) in self.targets.iter().zip(&previous) {
            guard.set_cursor(target);
            if let Err(err) = guard.set_origin_to_cursor(id) {
                roll_back(&mut guard, &moved);
                return Err(err);
            }
            moved.push((id, prior));
            debug!(object = ?id, origin = ?target, "relocated");
        }

        Ok(())
    }
}

/// Puts earlier origins back, most recent first.
fn roll_back<H: Host>(guard: &mut HostStateGuard<'_, H>, moved: &[(H::ObjectId, Point3)]) {
    for &(id, origin) in moved.iter().rev() {
        guard.set_cursor(origin);
        match guard.set_origin_to_cursor(id) {
            Ok(()) => debug!(object = ?id, ?origin, "rolled back"),
            Err(err) => warn!(object = ?id, %err, "failed to roll back origin"),
        }
    }
}
