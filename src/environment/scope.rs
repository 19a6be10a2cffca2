use rustc_hash::FxHashMap;

use crate::{
    errors::errors::{Error, ErrorImpl},
    Position,
};

/// Index of a scope inside an [`Environment`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

#[derive(Debug)]
struct Scope<V, F> {
    parent: Option<ScopeId>,
    variables: Vec<(String, V)>,
    variable_lookup: FxHashMap<String, usize>,
    functions: Vec<((String, usize), F)>,
    function_lookup: FxHashMap<(String, usize), usize>,
}

impl<V, F> Scope<V, F> {
    fn new(parent: Option<ScopeId>) -> Self {
        Scope {
            parent,
            variables: Vec::new(),
            variable_lookup: FxHashMap::default(),
            functions: Vec::new(),
            function_lookup: FxHashMap::default(),
        }
    }
}

/// Arena of chained scopes.
///
/// The analyzer stores [`Variable`](super::types::Variable)s and signatures here, the
/// interpreter stores runtime values and callables. Scopes are released in LIFO order, so
/// a scope id stays valid until the scope itself or one of its ancestors is released.
#[derive(Debug)]
pub struct Environment<V, F> {
    scopes: Vec<Scope<V, F>>,
}

impl<V, F> Environment<V, F> {
    pub fn new() -> Self {
        Environment {
            scopes: vec![Scope::new(None)],
        }
    }

    pub fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    pub fn child(&mut self, parent: ScopeId) -> ScopeId {
        self.scopes.push(Scope::new(Some(parent)));
        ScopeId(self.scopes.len() - 1)
    }

    /// Releases `scope` and every scope created after it.
    pub fn release(&mut self, scope: ScopeId) {
        debug_assert!(scope.0 != 0, "the root scope is never released");
        self.scopes.truncate(scope.0.max(1));
    }

    pub fn depth(&self) -> usize {
        self.scopes.len()
    }

    pub fn define_variable(&mut self, scope: ScopeId, name: &str, value: V, position: Position) -> Result<(), Error> {
        let scope = &mut self.scopes[scope.0];
        if scope.variable_lookup.contains_key(name) {
            return Err(Error::new(
                ErrorImpl::DuplicateDefinition {
                    name: String::from(name),
                },
                position,
            ));
        }

        scope.variable_lookup.insert(String::from(name), scope.variables.len());
        scope.variables.push((String::from(name), value));
        Ok(())
    }

    pub fn define_function(
        &mut self,
        scope: ScopeId,
        name: &str,
        arity: usize,
        function: F,
        position: Position,
    ) -> Result<(), Error> {
        let scope = &mut self.scopes[scope.0];
        let key = (String::from(name), arity);
        if scope.function_lookup.contains_key(&key) {
            return Err(Error::new(
                ErrorImpl::DuplicateDefinition {
                    name: format!("{}/{}", name, arity),
                },
                position,
            ));
        }

        scope.function_lookup.insert(key.clone(), scope.functions.len());
        scope.functions.push((key, function));
        Ok(())
    }

    fn find_variable(&self, scope: ScopeId, name: &str) -> Option<(ScopeId, usize)> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = &self.scopes[id.0];
            if let Some(index) = scope.variable_lookup.get(name) {
                return Some((id, *index));
            }
            current = scope.parent;
        }

        None
    }

    pub fn lookup_variable(&self, scope: ScopeId, name: &str, position: Position) -> Result<&V, Error> {
        match self.find_variable(scope, name) {
            Some((id, index)) => Ok(&self.scopes[id.0].variables[index].1),
            None => Err(undefined(name, position)),
        }
    }

    pub fn lookup_variable_mut(&mut self, scope: ScopeId, name: &str, position: Position) -> Result<&mut V, Error> {
        match self.find_variable(scope, name) {
            Some((id, index)) => Ok(&mut self.scopes[id.0].variables[index].1),
            None => Err(undefined(name, position)),
        }
    }

    pub fn lookup_function(&self, scope: ScopeId, name: &str, arity: usize, position: Position) -> Result<&F, Error> {
        let key = (String::from(name), arity);
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = &self.scopes[id.0];
            if let Some(index) = scope.function_lookup.get(&key) {
                return Ok(&scope.functions[*index].1);
            }
            current = scope.parent;
        }

        Err(undefined(&format!("{}/{}", name, arity), position))
    }

    /// Variables defined directly in `scope`, in insertion order.
    pub fn variables(&self, scope: ScopeId) -> impl Iterator<Item = (&str, &V)> {
        self.scopes[scope.0].variables.iter().map(|(name, value)| (name.as_str(), value))
    }
}

impl<V, F> Default for Environment<V, F> {
    fn default() -> Self {
        Self::new()
    }
}

fn undefined(name: &str, position: Position) -> Error {
    Error::new(
        ErrorImpl::UndefinedName {
            name: String::from(name),
        },
        position,
    )
}
