pub mod node;

pub use node::*;

pub use node::color;

impl QuadNode {
	/// Merges near-uniform detail out of the tree, in place.
	///
	/// Children are visited before their parent, so every merge
	/// decision sees fully merged subtrees. A branch whose children
	/// are all leaves collapses into a single leaf when the chained
	/// pairs (tl, tr), (tr, bl) and (bl, br) are all similar, or when
	/// the branch sits deeper than `max_level`; the replacement leaf
	/// takes the channel-wise floor average of the children that
	/// exist. A branch with any branch child is left alone whatever
	/// its depth, so merging climbs strictly one level per pass over a
	/// subtree.
	///
	/// An absent edge child counts as a leaf and compares as similar
	/// to anything. Running the pass twice with the same budget
	/// changes nothing the second time.
	pub fn compress(&mut self, max_level: u32) {
		if self.is_leaf() {
			return;
		}

		if let Some(node) = &mut self.tl {
			node.compress(max_level);
		}
		if let Some(node) = &mut self.tr {
			node.compress(max_level);
		}
		if let Some(node) = &mut self.bl {
			node.compress(max_level);
		}
		if let Some(node) = &mut self.br {
			node.compress(max_level);
		}

		if !self.children().iter().all(|c| c.map_or(true, QuadNode::is_leaf)) {
			return;
		}

		let chained = similar(self.tl.as_deref(), self.tr.as_deref())
			&& similar(self.tr.as_deref(), self.bl.as_deref())
			&& similar(self.bl.as_deref(), self.br.as_deref());
		if chained || self.level > max_level {
			let colors = self
				.children()
				.iter()
				.filter_map(|c| c.map(|node| node.color))
				.collect::<Vec<_>>();
			self.color = match color::average(&colors) {
				Some(c) => c,
				None => unreachable!("branch node with no children"),
			};
			self.tl = None;
			self.tr = None;
			self.bl = None;
			self.br = None;
		}
	}
}

/// Vacuously true when either node is absent, so a missing edge child
/// never blocks a merge.
fn similar(a: Option<&QuadNode>, b: Option<&QuadNode>) -> bool {
	match (a, b) {
		(Some(a), Some(b)) => color::is_similar(a.color, b.color),
		_ => true,
	}
}
