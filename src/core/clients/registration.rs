//! Client registrations keyed by capability and name

use crate::core::options::OptionsSnapshot;
use crate::utils::error::Result;
use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::sync::Arc;

type BuildFn<C> = dyn Fn(&OptionsSnapshot) -> Result<Arc<C>> + Send + Sync;

/// How to build one named client for capability `C`
pub(crate) struct ClientRegistration<C: ?Sized> {
    pub(crate) name: String,
    build: Arc<BuildFn<C>>,
}

impl<C: ?Sized> ClientRegistration<C> {
    pub(crate) fn new<F>(name: impl Into<String>, build: F) -> Self
    where
        F: Fn(&OptionsSnapshot) -> Result<Arc<C>> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            build: Arc::new(build),
        }
    }

    pub(crate) fn build(&self, snapshot: &OptionsSnapshot) -> Result<Arc<C>> {
        (self.build)(snapshot)
    }
}

struct CapabilitySlot {
    type_name: &'static str,
    names: Vec<String>,
    // Vec<ClientRegistration<C>> for the slot's TypeId
    registrations: Box<dyn Any + Send + Sync>,
}

/// Registrations grouped by the capability type they satisfy
#[derive(Default)]
pub(crate) struct CapabilityMap {
    slots: HashMap<TypeId, CapabilitySlot>,
}

impl CapabilityMap {
    /// Add a registration, replacing one with the same name in place
    pub(crate) fn insert<C: ?Sized + 'static>(&mut self, registration: ClientRegistration<C>) {
        let slot = self
            .slots
            .entry(TypeId::of::<C>())
            .or_insert_with(|| CapabilitySlot {
                type_name: type_name::<C>(),
                names: Vec::new(),
                registrations: Box::new(Vec::<ClientRegistration<C>>::new()),
            });

        if let Some(list) = slot
            .registrations
            .downcast_mut::<Vec<ClientRegistration<C>>>()
        {
            match list.iter_mut().find(|r| r.name == registration.name) {
                Some(existing) => *existing = registration,
                None => {
                    slot.names.push(registration.name.clone());
                    list.push(registration);
                }
            }
        }
    }

    pub(crate) fn get<C: ?Sized + 'static>(&self) -> &[ClientRegistration<C>] {
        self.slots
            .get(&TypeId::of::<C>())
            .and_then(|slot| {
                slot.registrations
                    .downcast_ref::<Vec<ClientRegistration<C>>>()
            })
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Client names registered for `C`, in registration order
    pub(crate) fn names<C: ?Sized + 'static>(&self) -> &[String] {
        self.slots
            .get(&TypeId::of::<C>())
            .map(|slot| slot.names.as_slice())
            .unwrap_or(&[])
    }

    /// `(capability type name, client names)` for every capability
    pub(crate) fn summary(&self) -> Vec<(&'static str, &[String])> {
        let mut summary: Vec<_> = self
            .slots
            .values()
            .map(|slot| (slot.type_name, slot.names.as_slice()))
            .collect();
        summary.sort_by_key(|(type_name, _)| *type_name);
        summary
    }
}
