//! Call-dependency graph over top-level declarations.
//!
//! Mutually recursive declarations must be inferred together. The graph is
//! split into strongly connected components with Tarjan's algorithm, run on
//! an explicit work stack so deep call chains cannot overflow the native
//! stack. A component containing a cycle is a *maximal overlapping cycle*:
//! the union of every cycle sharing a vertex with another.
//!
//! Components are produced dependencies first, so a reduced graph walked in
//! order always sees a declaration's callees before the declaration itself.

use fxhash::FxHashMap;
use std::slice;

/// Directed graph: an edge `f -> g` means `f` refers to `g`.
#[derive(Debug, Clone, Default)]
pub struct CallGraph {
    names: Vec<String>,
    index: FxHashMap<String, usize>,
    edges: Vec<Vec<usize>>,
}

impl CallGraph {
    /// Create an empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a declaration, returning its node index. Adding twice is a no-op.
    pub fn add_node(&mut self, name: impl Into<String>) -> usize {
        let name = name.into();
        if let Some(&node) = self.index.get(&name) {
            return node;
        }
        let node = self.names.len();
        self.index.insert(name.clone(), node);
        self.names.push(name);
        self.edges.push(Vec::new());
        node
    }

    /// Adds `from -> to`. Returns `false` when either end is unknown.
    pub fn add_edge(&mut self, from: &str, to: &str) -> bool {
        let (Some(&from), Some(&to)) = (self.index.get(from), self.index.get(to)) else {
            return false;
        };
        if !self.edges[from].contains(&to) {
            self.edges[from].push(to);
        }
        true
    }

    /// Number of declarations.
    pub fn len(&self) -> usize {
        self.names.len()
    }

    /// Checks if the graph has no declarations.
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Checks if `name` is a node.
    pub fn contains(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    /// Declarations in insertion order.
    pub fn names(&self) -> &[String] {
        &self.names
    }

    /// Declarations referenced by `name`.
    pub fn callees(&self, name: &str) -> impl Iterator<Item = &str> {
        self.index
            .get(name)
            .map(|&node| self.edges[node].as_slice())
            .unwrap_or_default()
            .iter()
            .map(|&callee| self.names[callee].as_str())
    }

    fn has_self_loop(&self, node: usize) -> bool {
        self.edges[node].contains(&node)
    }

    /// Strongly connected components, dependencies first. Members of a
    /// component are sorted by name.
    pub fn strongly_connected_components(&self) -> Vec<Vec<usize>> {
        let mut tarjan = Tarjan::new(self.len());
        for root in 0..self.len() {
            if tarjan.indices[root].is_none() {
                tarjan.run(self, root);
            }
        }
        let mut components = tarjan.components;
        for component in &mut components {
            component.sort_by(|&a, &b| self.names[a].cmp(&self.names[b]));
        }
        components
    }

    /// Components that contain at least one cycle, dependencies first.
    pub fn maximal_overlapping_cycles(&self) -> Vec<Vec<String>> {
        self.strongly_connected_components()
            .into_iter()
            .filter(|c| c.len() > 1 || self.has_self_loop(c[0]))
            .map(|c| c.into_iter().map(|n| self.names[n].clone()).collect())
            .collect()
    }

    /// Collapses every cycle into one vertex.
    pub fn reduce(&self) -> ReducedGraph {
        let components = self.strongly_connected_components();
        let mut owner = vec![0; self.len()];
        for (vertex, component) in components.iter().enumerate() {
            for &node in component {
                owner[node] = vertex;
            }
        }

        let mut edges = vec![Vec::new(); components.len()];
        for (from, targets) in self.edges.iter().enumerate() {
            for &to in targets {
                let (a, b) = (owner[from], owner[to]);
                if a != b && !edges[a].contains(&b) {
                    edges[a].push(b);
                }
            }
        }

        let vertices = components
            .into_iter()
            .map(|component| {
                if component.len() == 1 && !self.has_self_loop(component[0]) {
                    Vertex::Single(self.names[component[0]].clone())
                } else {
                    Vertex::Cluster(component.into_iter().map(|n| self.names[n].clone()).collect())
                }
            })
            .collect();

        ReducedGraph { vertices, edges }
    }
}

struct Tarjan {
    next: usize,
    indices: Vec<Option<usize>>,
    lowlink: Vec<usize>,
    on_stack: Vec<bool>,
    stack: Vec<usize>,
    components: Vec<Vec<usize>>,
}

impl Tarjan {
    fn new(len: usize) -> Self {
        Self {
            next: 0,
            indices: vec![None; len],
            lowlink: vec![0; len],
            on_stack: vec![false; len],
            stack: Vec::new(),
            components: Vec::new(),
        }
    }

    fn enter(&mut self, node: usize) {
        self.indices[node] = Some(self.next);
        self.lowlink[node] = self.next;
        self.next += 1;
        self.stack.push(node);
        self.on_stack[node] = true;
    }

    fn run(&mut self, graph: &CallGraph, root: usize) {
        // (node, position of the next edge to follow)
        let mut work = vec![(root, 0)];
        self.enter(root);

        while let Some(frame) = work.last_mut() {
            let (node, pos) = *frame;
            if let Some(&callee) = graph.edges[node].get(pos) {
                frame.1 += 1;
                match self.indices[callee] {
                    None => {
                        self.enter(callee);
                        work.push((callee, 0));
                    }
                    Some(index) if self.on_stack[callee] => {
                        self.lowlink[node] = self.lowlink[node].min(index);
                    }
                    Some(_) => {}
                }
                continue;
            }

            work.pop();
            if let Some(&(parent, _)) = work.last() {
                self.lowlink[parent] = self.lowlink[parent].min(self.lowlink[node]);
            }
            if self.indices[node] == Some(self.lowlink[node]) {
                let mut component = Vec::new();
                while let Some(member) = self.stack.pop() {
                    self.on_stack[member] = false;
                    component.push(member);
                    if member == node {
                        break;
                    }
                }
                self.components.push(component);
            }
        }
    }
}

/// A vertex of the reduced graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Vertex {
    /// A declaration on no cycle
    Single(String),
    /// Declarations checked jointly, sorted by name
    Cluster(Vec<String>),
}

impl Vertex {
    /// Declarations of this vertex.
    pub fn members(&self) -> &[String] {
        match self {
            Self::Single(name) => slice::from_ref(name),
            Self::Cluster(names) => names,
        }
    }

    /// Checks if this vertex groups a cycle.
    pub fn is_cluster(&self) -> bool {
        matches!(self, Self::Cluster(_))
    }
}

/// The acyclic graph left after collapsing cycles.
#[derive(Debug, Clone, Default)]
pub struct ReducedGraph {
    vertices: Vec<Vertex>,
    edges: Vec<Vec<usize>>,
}

impl ReducedGraph {
    /// Vertices, dependencies first.
    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Vertices that `vertex` depends on.
    pub fn dependencies(&self, vertex: usize) -> &[usize] {
        &self.edges[vertex]
    }

    /// Number of vertices.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    /// Checks if there are no vertices.
    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }
}
