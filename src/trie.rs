//! Prefix tree backing shell autocompletion.
//!
//! Holds command names and record titles; completions come back sorted so
//! the completion menu is stable between keystrokes.

use std::collections::HashMap;

#[derive(Debug, Default)]
struct Node {
    children: HashMap<char, Node>,
    terminal: bool,
}

/// A prefix tree over UTF-8 strings.
///
/// # Example
///
/// ```
/// use passlink::trie::Trie;
///
/// let mut trie = Trie::new();
/// trie.insert("share");
/// trie.insert("shares");
/// trie.insert("show");
///
/// assert_eq!(trie.completions("sha"), vec!["share", "shares"]);
/// assert!(trie.contains("show"));
/// assert!(!trie.contains("sh"));
/// ```
#[derive(Debug, Default)]
pub struct Trie {
    root: Node,
    count: usize,
}

impl Trie {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts a word. Inserting a word twice is a no-op.
    pub fn insert(&mut self, word: &str) {
        if word.is_empty() {
            return;
        }

        let mut current = &mut self.root;
        for ch in word.chars() {
            current = current.children.entry(ch).or_default();
        }
        if !current.terminal {
            current.terminal = true;
            self.count += 1;
        }
    }

    /// Removes a word, returning whether it was present. Branches left
    /// empty by the removal are not pruned.
    pub fn remove(&mut self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }

        let mut current = &mut self.root;
        for ch in word.chars() {
            current = match current.children.get_mut(&ch) {
                Some(node) => node,
                None => return false,
            };
        }

        if current.terminal {
            current.terminal = false;
            self.count -= 1;
            true
        } else {
            false
        }
    }

    pub fn contains(&self, word: &str) -> bool {
        if word.is_empty() {
            return false;
        }
        self.node_at(word).is_some_and(|node| node.terminal)
    }

    /// All words starting with `prefix`, sorted alphabetically. An empty
    /// prefix returns every word.
    pub fn completions(&self, prefix: &str) -> Vec<String> {
        let mut results = Vec::new();
        if let Some(node) = self.node_at(prefix) {
            let mut buffer = prefix.to_string();
            Self::walk(node, &mut buffer, &mut results);
        }
        results.sort();
        results
    }

    pub fn len(&self) -> usize {
        self.count
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    /// Drops every word. Used when the record set is replaced wholesale.
    pub fn clear(&mut self) {
        self.root = Node::default();
        self.count = 0;
    }

    fn node_at(&self, prefix: &str) -> Option<&Node> {
        let mut current = &self.root;
        for ch in prefix.chars() {
            current = current.children.get(&ch)?;
        }
        Some(current)
    }

    fn walk(node: &Node, buffer: &mut String, results: &mut Vec<String>) {
        if node.terminal {
            results.push(buffer.clone());
        }
        for (ch, child) in &node.children {
            buffer.push(*ch);
            Self::walk(child, buffer, results);
            buffer.pop();
        }
    }
}
