//! Incremental checking across edits.
//!
//! A [`Session`] remembers the syntax and environment of every declaration it
//! has checked. On the next run a declaration whose syntax is unchanged keeps
//! its environment; because node offsets are relative, moving a declaration
//! to another line does not count as a change. A changed declaration is
//! recomposed in place: unchanged statements and expressions inside it keep
//! their environments, only the edited subtree is analyzed again, and its
//! ancestors are re-merged into the slots they already occupied. The cluster
//! passes then run over the mix of cached and recomposed roots.
//!
//! Subtrees dropped by an edit stay in the arena as garbage. Once garbage
//! makes up more than half of the arena, the next run starts from an empty
//! arena.

use crate::check::EnvBuilder;
use crate::context::{EnvArena, EnvId};
use crate::driver::{Checker, ProgramReport, Slot};
use crate::error::Result;
use cortecs_log::debug;
use cortecs_syntax::ast::{Function, Node, Program};
use indexmap::IndexMap;

#[derive(Debug, Clone)]
struct CachedDecl {
    syntax: Node<Function>,
    root: EnvId,
}

/// Checker state kept between runs over successive versions of a document.
#[derive(Debug, Clone)]
pub struct Session {
    checker: Checker,
    arena: EnvArena,
    cache: IndexMap<String, CachedDecl>,
    garbage: usize,
    last_rebuilt: Vec<String>,
    last_reused: usize,
}

impl Session {
    /// Create a session with nothing cached.
    pub fn new(checker: Checker) -> Self {
        Self {
            checker,
            arena: EnvArena::new(),
            cache: IndexMap::new(),
            garbage: 0,
            last_rebuilt: Vec::new(),
            last_reused: 0,
        }
    }

    /// The checker used for every run.
    pub fn checker(&self) -> &Checker {
        &self.checker
    }

    /// Declarations whose environments the last run rebuilt, in source order.
    pub fn last_rebuilt(&self) -> &[String] {
        &self.last_rebuilt
    }

    /// Subtrees inside rebuilt declarations that the last run kept as they
    /// were.
    pub fn last_reused(&self) -> usize {
        self.last_reused
    }

    /// Environments currently held, live or garbage.
    pub fn arena_len(&self) -> usize {
        self.arena.len()
    }

    /// The environments built so far.
    pub fn arena(&self) -> &EnvArena {
        &self.arena
    }

    /// Root environment of the declaration `name`.
    pub fn root(&self, name: &str) -> Option<EnvId> {
        self.cache.get(name).map(|cached| cached.root)
    }

    /// Checks `program`, reusing what the previous run built.
    ///
    /// # Errors
    ///
    /// Fails only on internal inconsistencies, like [`Checker::check_program`].
    pub fn check(&mut self, program: &Program) -> Result<ProgramReport> {
        if self.garbage * 2 > self.arena.len() {
            debug!(
                "compacting: {} of {} environments unreachable",
                self.garbage,
                self.arena.len()
            );
            self.arena = EnvArena::new();
            self.cache.clear();
            self.garbage = 0;
        }

        self.last_rebuilt.clear();
        self.last_reused = 0;
        let mut cache = IndexMap::with_capacity(program.functions.len());
        let mut slots = Vec::with_capacity(program.functions.len());
        for func in &program.functions {
            let name = &func.kind.name.kind;
            if cache.contains_key(name) {
                slots.push(Slot::Duplicate(func));
                continue;
            }

            let root = match self.cache.shift_remove(name) {
                Some(cached) if cached.syntax.kind == func.kind && cached.syntax.span == func.span => {
                    cached.root
                }
                Some(cached) => {
                    let mut builder = EnvBuilder::new(&mut self.arena, self.checker.supply());
                    let root = builder.rebuild_function(&cached.syntax, cached.root, func);
                    self.last_reused += builder.reused();
                    self.last_rebuilt.push(name.clone());
                    root
                }
                None => {
                    self.last_rebuilt.push(name.clone());
                    EnvBuilder::new(&mut self.arena, self.checker.supply()).function(func)
                }
            };
            cache.insert(
                name.clone(),
                CachedDecl {
                    syntax: func.clone(),
                    root,
                },
            );
            slots.push(Slot::Checked { func, root });
        }
        self.cache = cache;

        let live: usize = self
            .cache
            .values()
            .map(|cached| self.arena.subtree_len(cached.root))
            .sum();
        self.garbage = self.arena.len().saturating_sub(live);

        debug!(
            "rebuilt {} of {} declarations, reusing {} subtrees; {} garbage",
            self.last_rebuilt.len(),
            self.cache.len(),
            self.last_reused,
            self.garbage
        );
        self.checker.solve(&self.arena, &slots)
    }
}
