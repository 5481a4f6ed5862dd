//! Dependency ordering of parameter declarations.
//!
//! Stable depth-first topological sort: declarations are visited in
//! declaration order and each one places its dependencies (in their declared
//! order) before itself. Independent parameters therefore keep declaration
//! order, which keeps assignment order reproducible.

use rustc_hash::FxHashMap;

use crate::error::DependencyError;
use crate::spec::ParamSpec;


#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Mark {
	Unvisited,
	InProgress,
	Done,
}

/// Returns declaration indices ordered so every parameter follows its dependencies.
pub(crate) fn resolve(type_name: &'static str, specs: &[&ParamSpec]) -> Result<Vec<usize>, DependencyError> {
	let mut resolver = Resolver {
		type_name,
		specs,
		index: specs
			.iter()
			.enumerate()
			.map(|(i, spec)| (spec.name.as_str(), i))
			.collect(),
		marks: vec![Mark::Unvisited; specs.len()],
		order: Vec::with_capacity(specs.len()),
	};
	for root in 0..specs.len() {
		resolver.visit(root)?;
	}
	Ok(resolver.order)
}

struct Resolver<'a> {
	type_name: &'static str,
	specs: &'a [&'a ParamSpec],
	index: FxHashMap<&'a str, usize>,
	marks: Vec<Mark>,
	order: Vec<usize>,
}

impl Resolver<'_> {
	fn visit(&mut self, root: usize) -> Result<(), DependencyError> {
		if self.marks[root] != Mark::Unvisited {
			return Ok(());
		}
		let specs = self.specs;
		// (declaration index, next dependency to look at)
		let mut stack: Vec<(usize, usize)> = vec![(root, 0)];
		self.marks[root] = Mark::InProgress;

		while let Some(frame) = stack.last_mut() {
			let (node, cursor) = *frame;
			let deps = &specs[node].depends_on;
			if cursor == deps.len() {
				stack.pop();
				self.marks[node] = Mark::Done;
				self.order.push(node);
				continue;
			}
			frame.1 += 1;

			let dep_name = &deps[cursor];
			let Some(&dep) = self.index.get(dep_name.as_str()) else {
				return Err(DependencyError::Unknown {
					type_name: self.type_name,
					param: specs[node].name.clone(),
					missing: dep_name.clone(),
				});
			};
			match self.marks[dep] {
				Mark::Done => {}
				Mark::InProgress => return Err(self.cycle(&stack, dep)),
				Mark::Unvisited => {
					self.marks[dep] = Mark::InProgress;
					stack.push((dep, 0));
				}
			}
		}
		Ok(())
	}

	/// Builds the cycle error for a back edge to `dep`, which is on `stack`.
	fn cycle(&self, stack: &[(usize, usize)], dep: usize) -> DependencyError {
		let start = stack.iter().position(|&(node, _)| node == dep).unwrap_or(0);
		let mut chain: Vec<String> = stack[start..]
			.iter()
			.map(|&(node, _)| self.specs[node].name.clone())
			.collect();
		chain.push(self.specs[dep].name.clone());
		DependencyError::Cycle {
			type_name: self.type_name,
			param: self.specs[dep].name.clone(),
			chain,
		}
	}
}
