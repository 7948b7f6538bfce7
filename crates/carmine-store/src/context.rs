//! Host services bundled for one options session.

use carmine_core::{ColorUtilities, Resolver, ThemeColorService};

use crate::storage::ColorStorage;

/// The host handles every gateway and resolver call goes through.
///
/// Built once by the host and passed down; nothing is cached globally.
#[derive(Clone, Copy)]
pub struct ColorContext<'a> {
    pub storage: &'a dyn ColorStorage,
    pub utilities: &'a dyn ColorUtilities,
    pub theme: &'a dyn ThemeColorService,
}

impl<'a> ColorContext<'a> {
    pub fn new(
        storage: &'a dyn ColorStorage,
        utilities: &'a dyn ColorUtilities,
        theme: &'a dyn ThemeColorService,
    ) -> Self {
        Self {
            storage,
            utilities,
            theme,
        }
    }

    /// Context backed by one object implementing every host interface.
    pub fn from_host<H>(host: &'a H) -> Self
    where
        H: ColorStorage + ColorUtilities + ThemeColorService,
    {
        Self::new(host, host, host)
    }

    pub fn resolver(&self) -> Resolver<'a> {
        Resolver::new(self.utilities, self.theme)
    }
}

impl std::fmt::Debug for ColorContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ColorContext").finish_non_exhaustive()
    }
}
