//! Read-side projections shared by the HTTP API and the CLI.

use anyhow::Result;
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

use mastermind_types::{CalendarView, CommentNode, ThreadView, Week};

use crate::db::repositories::{AuthoredComment, CommentRepository, PostRepository, WeekRepository};
use crate::db::Database;

/// Nest comments under their parents, keeping input order among siblings.
///
/// A comment whose parent is missing from `comments` becomes a root.
pub fn build_comment_tree(comments: Vec<AuthoredComment>) -> Vec<CommentNode> {
    let known: HashSet<String> = comments.iter().map(|c| c.comment.id.clone()).collect();

    let mut roots = Vec::new();
    let mut children: HashMap<String, Vec<AuthoredComment>> = HashMap::new();
    for authored in comments {
        match authored.comment.parent_comment_id.clone() {
            Some(parent) if known.contains(&parent) => children.entry(parent).or_default().push(authored),
            _ => roots.push(authored),
        }
    }

    roots
        .into_iter()
        .map(|root| attach_children(root, &mut children))
        .collect()
}

fn attach_children(authored: AuthoredComment, children: &mut HashMap<String, Vec<AuthoredComment>>) -> CommentNode {
    let replies = children.remove(&authored.comment.id).unwrap_or_default();
    CommentNode {
        children: replies
            .into_iter()
            .map(|reply| attach_children(reply, children))
            .collect(),
        id: authored.comment.id,
        author: authored.author,
        scheduled_at: authored.comment.scheduled_at,
        comment_text: authored.comment.comment_text,
    }
}

/// A post with its comment tree, `None` if the post does not exist
pub fn load_thread(db: &Database, post_id: &str) -> Result<Option<ThreadView>> {
    let post = match PostRepository::new(db.pool.clone()).get_thread_post(post_id)? {
        Some(post) => post,
        None => return Ok(None),
    };
    let comments = CommentRepository::new(db.pool.clone()).list_by_post(post_id)?;

    Ok(Some(ThreadView {
        post,
        comments: build_comment_tree(comments),
    }))
}

/// Calendar of `week`, or an empty calendar with no week
pub fn calendar_for(db: &Database, week: Option<Week>) -> Result<CalendarView> {
    let posts = match &week {
        Some(week) => PostRepository::new(db.pool.clone()).calendar_for_week(&week.id)?,
        None => Vec::new(),
    };
    Ok(CalendarView { week, posts })
}

/// Calendar of the most recent week
pub fn latest_calendar(db: &Database) -> Result<CalendarView> {
    let week = WeekRepository::new(db.pool.clone()).latest_overall()?;
    calendar_for(db, week)
}

/// Calendar of the week with `week_id`, `None` if unknown
pub fn week_calendar(db: &Database, week_id: &Uuid) -> Result<Option<CalendarView>> {
    match WeekRepository::new(db.pool.clone()).get_by_id(week_id)? {
        Some(week) => calendar_for(db, Some(week)).map(Some),
        None => Ok(None),
    }
}
