//! Structured view of a frame name.
//!
//! Frame names look like `com.acme.Worker.run(Worker.java:42)`, optionally
//! with a module prefix (`java.base@17/java.lang.Thread.run(Thread.java:833)`).
//! Anything that does not fit yields `None` from the accessors, never an error.

use super::call_graph::CallGraph;

/// Borrowed parts of a `qualifiedMethod(source)` frame name
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameDescriptor<'a> {
    qualified_method: &'a str,
    source: &'a str,
}

impl<'a> FrameDescriptor<'a> {
    /// Split a frame name into method and source parts
    ///
    /// Returns `None` for names without a trailing parenthesized source,
    /// such as the `root` sentinel or synthetic merge roots.
    pub fn parse(name: &'a str) -> Option<Self> {
        let inner = name.strip_suffix(')')?;
        let open = inner.find('(')?;
        let qualified = &inner[..open];

        // Drop "module@version/" prefixes
        let qualified_method = match qualified.rfind('/') {
            Some(slash) => &qualified[slash + 1..],
            None => qualified,
        };

        if qualified_method.is_empty() {
            return None;
        }

        Some(Self {
            qualified_method,
            source: &inner[open + 1..],
        })
    }

    pub fn method_name(&self) -> Option<&'a str> {
        match self.qualified_method.rsplit_once('.') {
            Some((_, method)) if !method.is_empty() => Some(method),
            Some(_) => None,
            None => Some(self.qualified_method),
        }
    }

    pub fn class_name(&self) -> Option<&'a str> {
        let (class_path, _) = self.qualified_method.rsplit_once('.')?;
        let class = class_path.rsplit_once('.').map_or(class_path, |(_, c)| c);
        (!class.is_empty()).then_some(class)
    }

    pub fn package_name(&self) -> Option<&'a str> {
        let (class_path, _) = self.qualified_method.rsplit_once('.')?;
        let (package, _) = class_path.rsplit_once('.')?;
        (!package.is_empty()).then_some(package)
    }

    /// File part of a `file:line` source tag
    pub fn file_name(&self) -> Option<&'a str> {
        let (file, _) = self.source.split_once(':')?;
        (!file.is_empty()).then_some(file)
    }

    pub fn line_number(&self) -> Option<u32> {
        let (_, line) = self.source.split_once(':')?;
        line.parse().ok()
    }
}

impl CallGraph {
    pub fn frame(&self) -> Option<FrameDescriptor<'_>> {
        FrameDescriptor::parse(self.name())
    }

    pub fn package_name(&self) -> Option<&str> {
        self.frame()?.package_name()
    }

    pub fn class_name(&self) -> Option<&str> {
        self.frame()?.class_name()
    }

    pub fn method_name(&self) -> Option<&str> {
        self.frame()?.method_name()
    }

    pub fn file_name(&self) -> Option<&str> {
        self.frame()?.file_name()
    }

    pub fn line_number(&self) -> Option<u32> {
        self.frame()?.line_number()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::ThreadState;

    #[test]
    fn test_full_frame() {
        let frame = FrameDescriptor::parse("com.acme.pool.Worker.run(Worker.java:42)").unwrap();
        assert_eq!(frame.package_name(), Some("com.acme.pool"));
        assert_eq!(frame.class_name(), Some("Worker"));
        assert_eq!(frame.method_name(), Some("run"));
        assert_eq!(frame.file_name(), Some("Worker.java"));
        assert_eq!(frame.line_number(), Some(42));
    }

    #[test]
    fn test_native_method_has_no_file() {
        let frame = FrameDescriptor::parse("java.lang.Thread.sleep(Native Method)").unwrap();
        assert_eq!(frame.class_name(), Some("Thread"));
        assert_eq!(frame.method_name(), Some("sleep"));
        assert_eq!(frame.file_name(), None);
        assert_eq!(frame.line_number(), None);
    }

    #[test]
    fn test_module_prefix_is_dropped() {
        let frame =
            FrameDescriptor::parse("java.base@17.0.2/java.lang.Thread.run(Thread.java:833)")
                .unwrap();
        assert_eq!(frame.package_name(), Some("java.lang"));
        assert_eq!(frame.line_number(), Some(833));
    }

    #[test]
    fn test_nested_class_and_default_package() {
        let frame = FrameDescriptor::parse("Outer$Inner.call(Outer.java:7)").unwrap();
        assert_eq!(frame.package_name(), None);
        assert_eq!(frame.class_name(), Some("Outer$Inner"));
        assert_eq!(frame.method_name(), Some("call"));
    }

    #[test]
    fn test_non_frame_names() {
        assert!(FrameDescriptor::parse("root").is_none());
        assert!(FrameDescriptor::parse("t1#t2").is_none());
        assert!(FrameDescriptor::parse("(x.java:1)").is_none());
    }

    #[test]
    fn test_bad_line_number_is_absent() {
        let frame = FrameDescriptor::parse("a.B.c(B.java:abc)").unwrap();
        assert_eq!(frame.file_name(), Some("B.java"));
        assert_eq!(frame.line_number(), None);
    }

    #[test]
    fn test_node_accessors() {
        let node = CallGraph::leaf("a.b.C.d(C.java:10)", ThreadState::Runnable);
        assert_eq!(node.package_name(), Some("a.b"));
        assert_eq!(node.class_name(), Some("C"));
        assert_eq!(node.method_name(), Some("d"));
        assert_eq!(node.file_name(), Some("C.java"));
        assert_eq!(node.line_number(), Some(10));

        let root = CallGraph::root();
        assert_eq!(root.method_name(), None);
    }
}
