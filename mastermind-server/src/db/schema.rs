/// SQL schema for the Mastermind database
/// Creates all tables with proper constraints, foreign keys, and indexes
pub const SCHEMA: &str = r#"
-- Companies table (the planner assumes exactly one row)
CREATE TABLE IF NOT EXISTS companies (
    id TEXT PRIMARY KEY,
    name TEXT NOT NULL,
    posts_per_week INTEGER NOT NULL DEFAULT 3
);

-- Personas post and comment on behalf of a company
CREATE TABLE IF NOT EXISTS personas (
    id TEXT PRIMARY KEY,
    company_id TEXT NOT NULL,
    username TEXT NOT NULL,
    bio TEXT,
    FOREIGN KEY (company_id) REFERENCES companies(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_personas_company ON personas(company_id);

-- Subreddits with an optional weekly posting cap
CREATE TABLE IF NOT EXISTS subreddits (
    id TEXT PRIMARY KEY,
    company_id TEXT NOT NULL,
    name TEXT NOT NULL,
    max_posts_per_week INTEGER,
    notes TEXT,
    FOREIGN KEY (company_id) REFERENCES companies(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_subreddits_company ON subreddits(company_id);

-- Keywords woven into post bodies
CREATE TABLE IF NOT EXISTS keywords (
    id TEXT PRIMARY KEY,
    company_id TEXT NOT NULL,
    keyword TEXT NOT NULL,
    FOREIGN KEY (company_id) REFERENCES companies(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_keywords_company ON keywords(company_id);

-- Generated weeks. week_number is unique per company so overlapping
-- generate calls cannot both commit the same week.
CREATE TABLE IF NOT EXISTS weeks (
    id TEXT PRIMARY KEY,
    company_id TEXT NOT NULL,
    week_start TEXT NOT NULL,
    week_number INTEGER NOT NULL,
    created_at TEXT NOT NULL,
    UNIQUE (company_id, week_number),
    FOREIGN KEY (company_id) REFERENCES companies(id) ON DELETE CASCADE
);

CREATE INDEX IF NOT EXISTS idx_weeks_number ON weeks(company_id, week_number DESC);

-- Scheduled posts; keyword_ids is a JSON array of keyword ids
CREATE TABLE IF NOT EXISTS posts (
    id TEXT PRIMARY KEY,
    week_id TEXT NOT NULL,
    subreddit_id TEXT NOT NULL,
    title TEXT NOT NULL,
    body TEXT NOT NULL,
    author_persona_id TEXT NOT NULL,
    scheduled_at TEXT NOT NULL,
    keyword_ids TEXT NOT NULL DEFAULT '[]',
    FOREIGN KEY (week_id) REFERENCES weeks(id) ON DELETE CASCADE,
    FOREIGN KEY (subreddit_id) REFERENCES subreddits(id),
    FOREIGN KEY (author_persona_id) REFERENCES personas(id)
);

CREATE INDEX IF NOT EXISTS idx_posts_week ON posts(week_id);
CREATE INDEX IF NOT EXISTS idx_posts_scheduled_at ON posts(scheduled_at DESC);

-- Scheduled comments; parent_comment_id is NULL for top-level comments
CREATE TABLE IF NOT EXISTS comments (
    id TEXT PRIMARY KEY,
    post_id TEXT NOT NULL,
    parent_comment_id TEXT,
    persona_id TEXT NOT NULL,
    scheduled_at TEXT NOT NULL,
    comment_text TEXT NOT NULL,
    FOREIGN KEY (post_id) REFERENCES posts(id) ON DELETE CASCADE,
    FOREIGN KEY (parent_comment_id) REFERENCES comments(id) ON DELETE CASCADE,
    FOREIGN KEY (persona_id) REFERENCES personas(id)
);

CREATE INDEX IF NOT EXISTS idx_comments_post ON comments(post_id);
"#;

/// Demo data for development and testing
/// - 1 company planning 3 posts a week
/// - 6 personas covering every comment tone
/// - 5 subreddits, one capped at a single post per week
/// - 10 keywords
pub const TEST_DATA: &str = r#"
-- ============================================================================
-- COMPANY
-- ============================================================================
INSERT OR IGNORE INTO companies (id, name, posts_per_week) VALUES
    ('7a1c0000-0000-4000-8000-000000000001', 'Slideforge', 3);

-- ============================================================================
-- PERSONAS
-- ============================================================================
INSERT OR IGNORE INTO personas (id, company_id, username, bio) VALUES
    ('7a1c0000-0000-4000-8000-000000000101', '7a1c0000-0000-4000-8000-000000000001', 'riley_sells', 'Enterprise sales rep who lives in client decks'),
    ('7a1c0000-0000-4000-8000-000000000102', '7a1c0000-0000-4000-8000-000000000001', 'jordan_ops', 'Runs operations for a 40-person agency'),
    ('7a1c0000-0000-4000-8000-000000000103', '7a1c0000-0000-4000-8000-000000000001', 'emily_pm', 'Product manager, writes too many roadmaps'),
    ('7a1c0000-0000-4000-8000-000000000104', '7a1c0000-0000-4000-8000-000000000001', 'alex_consults', 'Strategy consultant, ex-Big Four'),
    ('7a1c0000-0000-4000-8000-000000000105', '7a1c0000-0000-4000-8000-000000000001', 'priya_studies', 'MBA student juggling group presentations'),
    ('7a1c0000-0000-4000-8000-000000000106', '7a1c0000-0000-4000-8000-000000000001', 'sam_founder', 'Bootstrapped founder pitching investors');

-- ============================================================================
-- SUBREDDITS
-- ============================================================================
INSERT OR IGNORE INTO subreddits (id, company_id, name, max_posts_per_week, notes) VALUES
    ('7a1c0000-0000-4000-8000-000000000201', '7a1c0000-0000-4000-8000-000000000001', 'r/PowerPoint', 2, 'Tool questions welcome'),
    ('7a1c0000-0000-4000-8000-000000000202', '7a1c0000-0000-4000-8000-000000000001', 'r/consulting', 1, 'Strict about self-promotion'),
    ('7a1c0000-0000-4000-8000-000000000203', '7a1c0000-0000-4000-8000-000000000001', 'r/startups', 2, NULL),
    ('7a1c0000-0000-4000-8000-000000000204', '7a1c0000-0000-4000-8000-000000000001', 'r/productivity', NULL, 'Workflow threads do well'),
    ('7a1c0000-0000-4000-8000-000000000205', '7a1c0000-0000-4000-8000-000000000001', 'r/Entrepreneur', 2, NULL);

-- ============================================================================
-- KEYWORDS
-- ============================================================================
INSERT OR IGNORE INTO keywords (id, company_id, keyword) VALUES
    ('7a1c0000-0000-4000-8000-000000000301', '7a1c0000-0000-4000-8000-000000000001', 'ai presentation maker'),
    ('7a1c0000-0000-4000-8000-000000000302', '7a1c0000-0000-4000-8000-000000000001', 'pitch deck generator'),
    ('7a1c0000-0000-4000-8000-000000000303', '7a1c0000-0000-4000-8000-000000000001', 'slide templates'),
    ('7a1c0000-0000-4000-8000-000000000304', '7a1c0000-0000-4000-8000-000000000001', 'powerpoint alternative'),
    ('7a1c0000-0000-4000-8000-000000000305', '7a1c0000-0000-4000-8000-000000000001', 'canva slides'),
    ('7a1c0000-0000-4000-8000-000000000306', '7a1c0000-0000-4000-8000-000000000001', 'google slides'),
    ('7a1c0000-0000-4000-8000-000000000307', '7a1c0000-0000-4000-8000-000000000001', 'client deck'),
    ('7a1c0000-0000-4000-8000-000000000308', '7a1c0000-0000-4000-8000-000000000001', 'outline to slides'),
    ('7a1c0000-0000-4000-8000-000000000309', '7a1c0000-0000-4000-8000-000000000001', 'presentation design'),
    ('7a1c0000-0000-4000-8000-000000000310', '7a1c0000-0000-4000-8000-000000000001', 'investor deck');
"#;
