use std::fmt;

/// Storage class of an address.
///
/// Only `Stack`, `Struct` and `Link` are interpreted by the rewrite passes in
/// this crate. The remaining classes belong to the surrounding compiler and are
/// carried through untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Access {
    /// Persistent per-instance field.
    Struct,
    StaticStruct,
    FunArgs,
    /// Function-local storage, fresh on every invocation.
    Stack,
    Global,
    /// Tombstone: the owning declaration was superseded and must not be emitted.
    Link,
    Loop,
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Access::Struct => "struct",
            Access::StaticStruct => "static",
            Access::FunArgs => "arg",
            Access::Stack => "stack",
            Access::Global => "global",
            Access::Link => "link",
            Access::Loop => "loop",
        };
        f.write_str(s)
    }
}

/// Handle to one address node in an [`AddressTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AddrId(u32);

impl AddrId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NamedAddress {
    pub name: String,
    pub access: Access,
}

/// Arena owning every address node of a compilation.
///
/// Every reference site (declaration, load, store, loop counter) gets its own
/// handle. Variables are identified by name; handles identify reference sites.
/// Trees copied with the default clone rewrite share handles with the
/// original, so an access flip made here is seen by every copy.
#[derive(Debug, Default, Clone)]
pub struct AddressTable {
    entries: Vec<NamedAddress>,
}

impl AddressTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn alloc(&mut self, name: impl Into<String>, access: Access) -> AddrId {
        let id = AddrId(self.entries.len() as u32);
        self.entries.push(NamedAddress { name: name.into(), access });
        id
    }

    /// Panics if `id` was not allocated by this table.
    pub fn get(&self, id: AddrId) -> &NamedAddress {
        &self.entries[id.index()]
    }

    pub fn name(&self, id: AddrId) -> &str {
        &self.get(id).name
    }

    pub fn access(&self, id: AddrId) -> Access {
        self.get(id).access
    }

    pub fn set_access(&mut self, id: AddrId, access: Access) {
        self.entries[id.index()].access = access;
    }

    /// Allocate a new reference site with the same name and access as `id`.
    pub fn duplicate(&mut self, id: AddrId) -> AddrId {
        let NamedAddress { name, access } = self.get(id).clone();
        self.alloc(name, access)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (AddrId, &NamedAddress)> {
        self.entries
            .iter()
            .enumerate()
            .map(|(i, a)| (AddrId(i as u32), a))
    }
}
