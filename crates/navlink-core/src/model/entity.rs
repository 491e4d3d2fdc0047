use navlink_core_types::EntityKey;

/// An application object a context can track
///
/// The relationship machinery only ever needs an entity's key: descriptors
/// and links are recorded against keys, and payload serialization is left to
/// whoever owns the context's transport.
pub trait Entity {
    /// Identity of this entity within its context
    fn key(&self) -> &EntityKey;
}

impl Entity for EntityKey {
    fn key(&self) -> &EntityKey {
        self
    }
}

impl<E: Entity + ?Sized> Entity for &E {
    fn key(&self) -> &EntityKey {
        (**self).key()
    }
}

impl<E: Entity + ?Sized> Entity for Box<E> {
    fn key(&self) -> &EntityKey {
        (**self).key()
    }
}

impl<E: Entity + ?Sized> Entity for std::rc::Rc<E> {
    fn key(&self) -> &EntityKey {
        (**self).key()
    }
}
