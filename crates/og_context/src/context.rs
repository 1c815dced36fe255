use alloc::string::{String, ToString};

use crate::error::{ContextError, Result};
use crate::hooks::{HookRegistry, LifecycleDispatcher};
use crate::member::{MemberDescriptor, MemberStack};
use crate::node::{Node, ObjectId};
use crate::options::SerializerOptions;
use crate::parameters::Parameters;
use crate::visited::VisitedSet;

/// The state of one serialize or deserialize operation.
///
/// A writer asks [`should_serialize`] before emitting a member, and brackets
/// every composite object with [`serialization_start`] and
/// [`serialization_end`]. The context tracks the open identities and the
/// active members, and fires the lifecycle hooks of the nodes it sees.
///
/// One context serves one operation. Create a new one per operation, passing
/// the [`HookRegistry`] returned by [`finish`] to keep the cached hook tables.
///
/// # Examples
///
/// ```
/// use og_context::member::MemberDescriptor;
/// use og_context::{Node, Parameters, SerializationContext, SerializerOptions};
///
/// static NAME: MemberDescriptor = MemberDescriptor::new("name");
/// static NOTE: MemberDescriptor = MemberDescriptor::new("note");
///
/// struct User { name: String, note: Option<String> }
/// og_context::impl_type_hooks!(User);
///
/// let user = User { name: "ada".into(), note: None };
/// let mut cx = SerializationContext::new(SerializerOptions::new(), Parameters::new());
///
/// cx.serialization_start(&user).unwrap();
///
/// let name: &dyn Node = &user.name;
/// assert!(cx.should_serialize(Some(name), &NAME).unwrap());
///
/// let note = user.note.as_ref().map(|note| note as &dyn Node);
/// assert!(!cx.should_serialize(note, &NOTE).unwrap());
///
/// // `user` is open, a reference back to it is suppressed.
/// assert!(!cx.should_serialize(Some(&user), &NAME).unwrap());
///
/// cx.serialization_end(&user).unwrap();
/// cx.finish().unwrap();
/// ```
///
/// [`should_serialize`]: Self::should_serialize
/// [`serialization_start`]: Self::serialization_start
/// [`serialization_end`]: Self::serialization_end
/// [`finish`]: Self::finish
#[derive(Debug)]
pub struct SerializationContext<'m> {
    options: SerializerOptions,
    parameters: Parameters,
    registry: HookRegistry,
    visited: VisitedSet,
    members: MemberStack<'m>,
}

impl<'m> SerializationContext<'m> {
    /// Creates a context with nothing open and an empty hook cache.
    #[inline]
    pub fn new(options: SerializerOptions, parameters: Parameters) -> Self {
        Self::with_registry(options, parameters, HookRegistry::new())
    }

    /// Creates a context that reuses the hook tables of `registry`.
    pub fn with_registry(
        options: SerializerOptions,
        parameters: Parameters,
        registry: HookRegistry,
    ) -> Self {
        Self {
            options,
            parameters,
            registry,
            visited: VisitedSet::new(),
            members: MemberStack::new(),
        }
    }

    // -------------------------------------------------------------------------
    // Options and parameters

    #[inline]
    pub fn options(&self) -> &SerializerOptions {
        &self.options
    }

    /// Mutable access for format collaborators.
    ///
    /// Changes are visible to every later predicate call.
    #[inline]
    pub fn options_mut(&mut self) -> &mut SerializerOptions {
        &mut self.options
    }

    /// Replaces the options and returns the previous ones.
    #[inline]
    pub fn replace_options(&mut self, options: SerializerOptions) -> SerializerOptions {
        core::mem::replace(&mut self.options, options)
    }

    #[inline]
    pub fn parameters(&self) -> &Parameters {
        &self.parameters
    }

    #[inline]
    pub fn registry(&self) -> &HookRegistry {
        &self.registry
    }

    /// Hook tables registered here take effect for types not dispatched on yet.
    #[inline]
    pub fn registry_mut(&mut self) -> &mut HookRegistry {
        &mut self.registry
    }

    /// A dispatcher over this context's hook cache and parameters.
    #[inline]
    pub fn dispatcher(&mut self) -> LifecycleDispatcher<'_> {
        LifecycleDispatcher::new(&mut self.registry, &self.parameters)
    }

    // -------------------------------------------------------------------------
    // Member context

    /// Marks `member` as the innermost member being processed.
    pub fn push_member(&mut self, member: &'m MemberDescriptor) {
        log::trace!("push member `{member}`");
        self.members.push(member);
    }

    /// Ends the innermost member.
    ///
    /// Fails with [`ContextError::EmptyContext`] if no member is active.
    pub fn pop_member(&mut self) -> Result<&'m MemberDescriptor> {
        let member = self.members.pop()?;
        log::trace!("pop member `{member}`");
        Ok(member)
    }

    /// Returns the innermost member.
    ///
    /// Fails with [`ContextError::EmptyContext`] if no member is active.
    #[inline]
    pub fn current_member(&self) -> Result<&'m MemberDescriptor> {
        self.members.current()
    }

    /// Runs `f` with `member` pushed, popping it once `f` succeeds.
    ///
    /// On error the member stays active, so [`member_path`](Self::member_path)
    /// still points at the failure.
    pub fn with_member<R>(
        &mut self,
        member: &'m MemberDescriptor,
        f: impl FnOnce(&mut Self) -> Result<R>,
    ) -> Result<R> {
        self.push_member(member);
        let value = f(self)?;
        self.pop_member()?;
        Ok(value)
    }

    // -------------------------------------------------------------------------
    // Decisions

    /// Decides whether a member value is emitted.
    ///
    /// The checks run in order and the first one that decides wins:
    ///
    /// 1. An absent value is emitted only if the member serializes nulls.
    /// 2. A type with a [`ShouldSerialize`] hook is asked, a veto skips it.
    /// 3. A node that is open on the current path is skipped (cycle).
    /// 4. Everything else is emitted.
    ///
    /// Hook errors are returned as [`ContextError::Hook`].
    ///
    /// [`ShouldSerialize`]: crate::hooks::ShouldSerialize
    pub fn should_serialize(
        &mut self,
        value: Option<&dyn Node>,
        member: &MemberDescriptor,
    ) -> Result<bool> {
        let Some(node) = value else {
            if !member.serialize_if_null() {
                log::debug!("skip absent `{member}`");
            }
            return Ok(member.serialize_if_null());
        };

        let wanted = LifecycleDispatcher::new(&mut self.registry, &self.parameters)
            .should_serialize(node, &self.options)?;
        if !wanted {
            log::debug!("skip `{member}`, vetoed by `{}`", node.node_type_name());
            return Ok(false);
        }

        let id = ObjectId::of(node);
        if self.visited.contains(id) {
            log::debug!("skip `{member}`, {id} is already open");
            return Ok(false);
        }

        Ok(true)
    }

    // -------------------------------------------------------------------------
    // Enter and exit

    /// Opens `node` and fires its serialize-start hook.
    ///
    /// # Errors
    ///
    /// - [`ContextError::DepthLimitExceeded`] if `max_depth` nodes are open;
    ///   nothing is recorded.
    /// - [`ContextError::AlreadyOpen`] if `node` is open already.
    /// - [`ContextError::Hook`] if the hook fails; `node` stays open.
    pub fn serialization_start(&mut self, node: &dyn Node) -> Result<()> {
        let id = ObjectId::of(node);

        if let Some(limit) = self.options.max_depth
            && self.visited.depth() >= limit
        {
            return Err(ContextError::DepthLimitExceeded { limit, id });
        }

        self.visited.enter(id)?;
        log::trace!("enter {id} at depth {}", self.visited.depth());

        self.dispatcher().serialize_start(node)?;
        Ok(())
    }

    /// Closes `node`, which must be the innermost open node, then fires its
    /// serialize-end hook.
    ///
    /// A mismatch is fatal: the innermost node is closed anyway and
    /// [`ContextError::StructuralMismatch`] is returned without firing the hook.
    pub fn serialization_end(&mut self, node: &dyn Node) -> Result<()> {
        let id = ObjectId::of(node);

        if let Err(err) = self.visited.exit(id) {
            return Err(err.with_members(&self.members));
        }
        log::trace!("exit {id}");

        self.dispatcher().serialize_end(node)?;
        Ok(())
    }

    /// Fires the deserialize-start hook of `node`, before it is populated.
    pub fn deserialization_start(&mut self, node: &mut dyn Node) -> Result<()> {
        log::trace!("populate `{}`", node.node_type_name());
        self.dispatcher().deserialize_start(node)?;
        Ok(())
    }

    /// Fires the deserialize-end hook of `node`, after it was populated.
    pub fn deserialization_end(&mut self, node: &mut dyn Node) -> Result<()> {
        log::trace!("populated `{}`", node.node_type_name());
        self.dispatcher().deserialize_end(node)?;
        Ok(())
    }

    /// Runs `f` between [`serialization_start`](Self::serialization_start) and
    /// [`serialization_end`](Self::serialization_end) of `node`.
    ///
    /// `node` is only closed if `f` succeeds.
    pub fn serialize_scope<R>(
        &mut self,
        node: &dyn Node,
        f: impl FnOnce(&mut Self) -> Result<R>,
    ) -> Result<R> {
        self.serialization_start(node)?;
        let value = f(self)?;
        self.serialization_end(node)?;
        Ok(value)
    }

    /// Runs `f` to populate `node` between its deserialize hooks.
    ///
    /// The end hook only fires if `f` succeeds.
    pub fn deserialize_scope<N: Node, R>(
        &mut self,
        node: &mut N,
        f: impl FnOnce(&mut Self, &mut N) -> Result<R>,
    ) -> Result<R> {
        self.deserialization_start(node)?;
        let value = f(self, node)?;
        self.deserialization_end(node)?;
        Ok(value)
    }

    // -------------------------------------------------------------------------
    // Queries

    /// Number of open nodes.
    #[inline]
    pub fn depth(&self) -> usize {
        self.visited.depth()
    }

    /// Number of active members.
    #[inline]
    pub fn member_depth(&self) -> usize {
        self.members.depth()
    }

    #[inline]
    pub fn is_open(&self, node: &dyn Node) -> bool {
        self.visited.contains(ObjectId::of(node))
    }

    #[inline]
    pub fn visited(&self) -> &VisitedSet {
        &self.visited
    }

    #[inline]
    pub fn members(&self) -> &MemberStack<'m> {
        &self.members
    }

    /// The active members as `` `a` -> `b` ``, empty if none.
    pub fn member_path(&self) -> String {
        self.members.to_string()
    }

    /// Ends the operation and returns the hook cache for the next one.
    ///
    /// Fails with [`ContextError::Unbalanced`] if a node or member is still open.
    pub fn finish(self) -> Result<HookRegistry> {
        if !self.visited.is_empty() || !self.members.is_empty() {
            return Err(ContextError::Unbalanced {
                open_objects: self.visited.depth(),
                active_members: self.members.depth(),
            });
        }
        Ok(self.registry)
    }
}

// -----------------------------------------------------------------------------
// Tests
