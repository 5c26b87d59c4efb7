//! Course browser state.
//!
//! # Design
//! - Snapshots replace the tree wholesale; the selected lesson survives a refresh
//!   only if its id is still present.
//! - A category filter response is applied only while that category is still the
//!   chosen one, so a slow answer cannot override a newer choice.

use crate::core::tree::{
    LessonSequence, Step, TreeNavigator, TreeNode, TreeRow, contains_lesson, visible_rows,
};
use lectern_api_models::{Category, Course, CourseTree, LessonNode};

/// State backing the course browser page.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct BrowseState {
    /// Latest tree snapshot.
    pub courses: Vec<CourseTree>,
    /// Categories for the sidebar.
    pub categories: Vec<Category>,
    /// Chosen category; `None` shows every course.
    pub category_filter: Option<i64>,
    /// Course ids in the chosen category, once fetched.
    pub filtered_ids: Option<Vec<i64>>,
    /// Lessons in navigation order.
    pub sequence: LessonSequence,
    /// Expansion state of the tree.
    pub navigator: TreeNavigator,
    /// Lesson in the player.
    pub selected: Option<LessonNode>,
    /// Summary of the selected lesson's course.
    pub summary: Option<Course>,
    /// Tree request in flight.
    pub loading: bool,
    /// Last failure shown above the tree.
    pub error: Option<String>,
}

impl BrowseState {
    /// Replace the tree with a fresh snapshot.
    pub fn set_tree(&mut self, courses: Vec<CourseTree>) {
        self.sequence = LessonSequence::from_courses(&courses);
        self.courses = courses;
        self.selected = self
            .selected
            .as_ref()
            .and_then(|lesson| self.sequence.get(lesson.id))
            .cloned();
        if self.selected.is_none() {
            self.summary = None;
        }
        self.loading = false;
        self.error = None;
    }

    /// Record a failed tree fetch.
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.loading = false;
        self.error = Some(message.into());
    }

    /// Choose a sidebar category; `None` means "All".
    ///
    /// Returns the category whose courses must now be fetched, if any.
    pub fn choose_category(&mut self, category_id: Option<i64>) -> Option<i64> {
        self.category_filter = category_id;
        self.filtered_ids = None;
        category_id
    }

    /// Apply the course listing fetched for `category_id`.
    ///
    /// Returns `false` when the answer arrived after the user chose something else.
    pub fn apply_category_courses(&mut self, category_id: i64, courses: &[Course]) -> bool {
        if self.category_filter != Some(category_id) {
            return false;
        }
        self.filtered_ids = Some(courses.iter().map(|course| course.id).collect());
        true
    }

    /// Courses passing the category filter.
    ///
    /// While a filter's listing is still loading every course is shown.
    pub fn visible_courses(&self) -> impl Iterator<Item = &CourseTree> {
        let ids = self.filtered_ids.as_deref();
        self.courses
            .iter()
            .filter(move |tree| passes_filter(ids, tree))
    }

    /// Renderable rows for the current filter and expansion state.
    #[must_use]
    pub fn rows(&self) -> Vec<TreeRow<'_>> {
        visible_rows(self.visible_courses(), &self.navigator)
    }

    /// Flip a course or module open or closed.
    pub fn toggle(&mut self, node: TreeNode) {
        self.navigator.toggle(node);
    }

    /// Expand every visible course and module.
    pub fn expand_all(&mut self) {
        let ids = self.filtered_ids.as_deref();
        for course in self.courses.iter().filter(|tree| passes_filter(ids, tree)) {
            self.navigator.expand_all(course);
        }
    }

    /// Collapse the whole tree.
    pub fn collapse_all(&mut self) {
        self.navigator.collapse_all();
    }

    /// Put `lesson_id` in the player.
    ///
    /// Returns the course id whose summary should be fetched when the lesson moved
    /// to another course, or `None` when nothing changed.
    pub fn select(&mut self, lesson_id: i64) -> Option<i64> {
        let lesson = self.sequence.get(lesson_id)?.clone();
        let previous_course = self.selected_course_id();
        self.selected = Some(lesson);
        let course_id = self.selected_course_id();
        if course_id == previous_course && self.summary.is_some() {
            return None;
        }
        self.summary = None;
        course_id
    }

    /// Move the player to the adjacent lesson; a no-op at either end.
    ///
    /// Returns what [`BrowseState::select`] returns for the new lesson.
    pub fn step(&mut self, step: Step) -> Option<i64> {
        let current = self.selected.as_ref()?.id;
        let target = self.sequence.step(current, step)?.id;
        self.select(target)
    }

    /// Whether a neighbour exists in direction `step`.
    #[must_use]
    pub fn can_step(&self, step: Step) -> bool {
        self.selected
            .as_ref()
            .is_some_and(|lesson| self.sequence.step(lesson.id, step).is_some())
    }

    /// Store a fetched course summary if it still matches the selection.
    pub fn set_summary(&mut self, course: Course) {
        if self.selected_course_id() == Some(course.id) {
            self.summary = Some(course);
        }
    }

    /// Id of the course containing the selected lesson.
    #[must_use]
    pub fn selected_course_id(&self) -> Option<i64> {
        let lesson_id = self.selected.as_ref()?.id;
        self.courses
            .iter()
            .find(|tree| contains_lesson(tree, lesson_id))
            .map(|tree| tree.course.id)
    }
}

fn passes_filter(ids: Option<&[i64]>, tree: &CourseTree) -> bool {
    ids.is_none_or(|ids| ids.contains(&tree.course.id))
}
