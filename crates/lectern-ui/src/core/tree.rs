//! Course tree navigation: expansion state, lesson flattening and row layout.
//!
//! # Design
//! - Trees come from the backend and their depth follows the on-disk folder layout,
//!   so every walk uses an explicit stack instead of call-stack recursion.
//! - Expansion is tracked per kind (course ids, module ids); ids are assumed unique
//!   within their kind, as assigned by the backend.
//! - Views render the flat row lists produced here, which keeps the component tree
//!   shallow regardless of module nesting.

use lectern_api_models::{CourseTree, LessonNode, ModuleNode};
use std::collections::HashSet;

/// A node whose expansion can be toggled.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum TreeNode {
    /// A course root.
    Course(i64),
    /// A module at any depth.
    Module(i64),
}

/// Expand/collapse state for the course browser.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TreeNavigator {
    expanded_courses: HashSet<i64>,
    expanded_modules: HashSet<i64>,
}

impl TreeNavigator {
    /// Navigator with everything collapsed.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Flip the expansion of `node`.
    pub fn toggle(&mut self, node: TreeNode) {
        let (set, id) = match node {
            TreeNode::Course(id) => (&mut self.expanded_courses, id),
            TreeNode::Module(id) => (&mut self.expanded_modules, id),
        };
        if !set.remove(&id) {
            set.insert(id);
        }
    }

    /// Flip a course.
    pub fn toggle_course(&mut self, course_id: i64) {
        self.toggle(TreeNode::Course(course_id));
    }

    /// Flip a module.
    pub fn toggle_module(&mut self, module_id: i64) {
        self.toggle(TreeNode::Module(module_id));
    }

    /// Whether `node` is expanded.
    #[must_use]
    pub fn is_expanded(&self, node: TreeNode) -> bool {
        match node {
            TreeNode::Course(id) => self.expanded_courses.contains(&id),
            TreeNode::Module(id) => self.expanded_modules.contains(&id),
        }
    }

    /// Expand `course` and every module beneath it. Returns the number of modules marked.
    pub fn expand_all(&mut self, course: &CourseTree) -> usize {
        self.expanded_courses.insert(course.course.id);
        self.expand_modules(&course.modules)
    }

    /// Expand every module in `modules` and their descendants. Returns the number marked.
    pub fn expand_modules(&mut self, modules: &[ModuleNode]) -> usize {
        let mut marked = 0;
        let mut stack: Vec<&ModuleNode> = modules.iter().collect();
        while let Some(module) = stack.pop() {
            self.expanded_modules.insert(module.id);
            marked += 1;
            stack.extend(module.children.iter());
        }
        marked
    }

    /// Collapse everything.
    pub fn collapse_all(&mut self) {
        self.expanded_courses.clear();
        self.expanded_modules.clear();
    }
}

/// Every lesson of every course in pre-order: a module's own lessons come before its
/// children's, and sibling order is kept as served.
#[must_use]
pub fn flatten_lessons(courses: &[CourseTree]) -> Vec<LessonNode> {
    courses
        .iter()
        .flat_map(|course| walk_modules(&course.modules))
        .flat_map(|module| module.lessons.iter().cloned())
        .collect()
}

/// Total number of lessons under `modules`, at any depth.
#[must_use]
pub fn count_lessons(modules: &[ModuleNode]) -> usize {
    walk_modules(modules)
        .into_iter()
        .map(|module| module.lessons.len())
        .sum()
}

/// Total number of modules under `modules`, at any depth.
#[must_use]
pub fn count_modules(modules: &[ModuleNode]) -> usize {
    walk_modules(modules).len()
}

/// Whether `lesson_id` appears anywhere inside `course`.
#[must_use]
pub fn contains_lesson(course: &CourseTree, lesson_id: i64) -> bool {
    walk_modules(&course.modules)
        .into_iter()
        .any(|module| module.lessons.iter().any(|lesson| lesson.id == lesson_id))
}

/// Modules in pre-order, without recursion.
fn walk_modules(modules: &[ModuleNode]) -> Vec<&ModuleNode> {
    let mut order = Vec::new();
    let mut stack: Vec<&ModuleNode> = modules.iter().rev().collect();
    while let Some(module) = stack.pop() {
        order.push(module);
        stack.extend(module.children.iter().rev());
    }
    order
}

/// Direction for sequential lesson navigation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Step {
    /// Towards the start.
    Previous,
    /// Towards the end.
    Next,
}

/// Flattened lessons used for previous/next navigation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LessonSequence {
    lessons: Vec<LessonNode>,
}

impl LessonSequence {
    /// Build the sequence for a full tree snapshot.
    #[must_use]
    pub fn from_courses(courses: &[CourseTree]) -> Self {
        Self {
            lessons: flatten_lessons(courses),
        }
    }

    /// Lessons in navigation order.
    #[must_use]
    pub fn lessons(&self) -> &[LessonNode] {
        &self.lessons
    }

    /// Number of lessons.
    #[must_use]
    pub fn len(&self) -> usize {
        self.lessons.len()
    }

    /// Whether the sequence is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lessons.is_empty()
    }

    /// Index of the lesson with `lesson_id`.
    #[must_use]
    pub fn position(&self, lesson_id: i64) -> Option<usize> {
        self.lessons.iter().position(|lesson| lesson.id == lesson_id)
    }

    /// Lesson with `lesson_id`.
    #[must_use]
    pub fn get(&self, lesson_id: i64) -> Option<&LessonNode> {
        self.position(lesson_id).map(|index| &self.lessons[index])
    }

    /// Neighbour of `lesson_id` in direction `step`; `None` at either boundary or
    /// when the lesson is not part of the sequence.
    #[must_use]
    pub fn step(&self, lesson_id: i64, step: Step) -> Option<&LessonNode> {
        let index = self.position(lesson_id)?;
        let target = match step {
            Step::Previous => index.checked_sub(1)?,
            Step::Next => index + 1,
        };
        self.lessons.get(target)
    }

    /// Lesson after `lesson_id`.
    #[must_use]
    pub fn next(&self, lesson_id: i64) -> Option<&LessonNode> {
        self.step(lesson_id, Step::Next)
    }

    /// Lesson before `lesson_id`.
    #[must_use]
    pub fn previous(&self, lesson_id: i64) -> Option<&LessonNode> {
        self.step(lesson_id, Step::Previous)
    }
}

/// One renderable line of a course tree.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TreeRow<'a> {
    /// Course header.
    Course {
        /// The course.
        course: &'a CourseTree,
        /// Whether its modules are shown.
        expanded: bool,
    },
    /// Module header.
    Module {
        /// The module.
        module: &'a ModuleNode,
        /// Nesting depth; top-level modules are at depth 1.
        depth: usize,
        /// Whether its contents are shown.
        expanded: bool,
    },
    /// Lesson entry.
    Lesson {
        /// The lesson.
        lesson: &'a LessonNode,
        /// Nesting depth.
        depth: usize,
    },
}

enum Pending<'a> {
    Module(&'a ModuleNode, usize),
    Lesson(&'a LessonNode, usize),
}

/// Rows currently visible in the browser: collapsed nodes hide their contents.
///
/// Within an expanded module its own lessons come before its child modules, matching
/// the order of [`flatten_lessons`] so previous/next follows what is on screen.
#[must_use]
pub fn visible_rows<'a>(
    courses: impl IntoIterator<Item = &'a CourseTree>,
    navigator: &TreeNavigator,
) -> Vec<TreeRow<'a>> {
    let mut rows = Vec::new();
    for course in courses {
        let expanded = navigator.is_expanded(TreeNode::Course(course.course.id));
        rows.push(TreeRow::Course { course, expanded });
        if expanded {
            push_module_rows(&mut rows, &course.modules, |id| {
                navigator.is_expanded(TreeNode::Module(id))
            });
        }
    }
    rows
}

/// Every module and lesson row of `course`, fully expanded, without the course row.
#[must_use]
pub fn all_rows(course: &CourseTree) -> Vec<TreeRow<'_>> {
    let mut rows = Vec::new();
    push_module_rows(&mut rows, &course.modules, |_| true);
    rows
}

fn push_module_rows<'a>(
    rows: &mut Vec<TreeRow<'a>>,
    modules: &'a [ModuleNode],
    is_expanded: impl Fn(i64) -> bool,
) {
    let mut stack: Vec<Pending<'a>> = modules
        .iter()
        .rev()
        .map(|module| Pending::Module(module, 1))
        .collect();
    while let Some(pending) = stack.pop() {
        match pending {
            Pending::Lesson(lesson, depth) => rows.push(TreeRow::Lesson { lesson, depth }),
            Pending::Module(module, depth) => {
                let expanded = is_expanded(module.id);
                rows.push(TreeRow::Module {
                    module,
                    depth,
                    expanded,
                });
                if expanded {
                    stack.extend(
                        module
                            .children
                            .iter()
                            .rev()
                            .map(|child| Pending::Module(child, depth + 1)),
                    );
                    stack.extend(
                        module
                            .lessons
                            .iter()
                            .rev()
                            .map(|lesson| Pending::Lesson(lesson, depth + 1)),
                    );
                }
            }
        }
    }
}
