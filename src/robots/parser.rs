//! Robots.txt parser implementation
//!
//! Rules are grouped by lowercased agent token. A run of consecutive
//! `User-agent` lines opens one group; the first other directive closes it, and
//! the next `User-agent` line starts a fresh group.

/// Agent assumed when the caller supplies an empty user agent
pub const FALLBACK_AGENT: &str = "sga-site-crawler";

/// Allow/disallow prefixes selected for one user agent
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RobotsRules {
    pub allow: Vec<String>,
    pub disallow: Vec<String>,
}

impl RobotsRules {
    /// Rules that permit every path
    pub fn allow_all() -> Self {
        Self::default()
    }

    pub fn is_empty(&self) -> bool {
        self.allow.is_empty() && self.disallow.is_empty()
    }

    /// Checks a path (with query) against the rules
    ///
    /// The longest matching allow prefix competes with the longest matching
    /// disallow prefix; ties go to allow. Empty rule strings never match.
    ///
    /// # Examples
    ///
    /// ```
    /// use sga_site_crawler::robots::parse_robots;
    ///
    /// let rules = parse_robots("User-agent: *\nDisallow: /private\nAllow: /private/public", "bot");
    /// assert!(rules.is_allowed("/private/public/x"));
    /// assert!(!rules.is_allowed("/private/x"));
    /// ```
    pub fn is_allowed(&self, path_with_query: &str) -> bool {
        let path = if path_with_query.is_empty() {
            "/"
        } else {
            path_with_query
        };

        let best_disallow = longest_match(&self.disallow, path);
        let best_allow = longest_match(&self.allow, path);

        match (best_disallow, best_allow) {
            (None, _) => true,
            (Some(_), None) => false,
            (Some(disallow_len), Some(allow_len)) => allow_len >= disallow_len,
        }
    }
}

fn longest_match(prefixes: &[String], path: &str) -> Option<usize> {
    prefixes
        .iter()
        .filter(|p| !p.is_empty() && path.starts_with(p.as_str()))
        .map(String::len)
        .max()
}

#[derive(Debug, Default)]
struct AgentGroups {
    /// Agent token and its rules, in first-seen order
    groups: Vec<(String, RobotsRules)>,
}

impl AgentGroups {
    fn entry(&mut self, agent: &str) -> &mut RobotsRules {
        let index = match self.groups.iter().position(|(a, _)| a == agent) {
            Some(index) => index,
            None => {
                self.groups.push((agent.to_string(), RobotsRules::default()));
                self.groups.len() - 1
            }
        };
        &mut self.groups[index].1
    }

    fn get(&self, agent: &str) -> Option<&RobotsRules> {
        self.groups.iter().find(|(a, _)| a == agent).map(|(_, r)| r)
    }

    /// Picks the longest agent token contained in `user_agent`, else `*`
    fn select(mut self, user_agent: &str) -> RobotsRules {
        let user_agent = if user_agent.trim().is_empty() {
            FALLBACK_AGENT.to_string()
        } else {
            user_agent.to_lowercase()
        };

        let mut selected: Option<usize> = None;
        let mut selected_len = usize::from(self.get("*").is_some());

        for (index, (agent, _)) in self.groups.iter().enumerate() {
            if agent == "*" {
                continue;
            }
            if user_agent.contains(agent.as_str()) && agent.len() > selected_len {
                selected = Some(index);
                selected_len = agent.len();
            }
        }

        match selected {
            Some(index) => self.groups.swap_remove(index).1,
            None => self
                .groups
                .into_iter()
                .find(|(a, _)| a == "*")
                .map(|(_, r)| r)
                .unwrap_or_default(),
        }
    }
}

/// Parses robots.txt text and returns the rules that apply to `user_agent`
///
/// Comments after `#` are stripped. Lines without a `key: value` shape (or
/// with an empty key) are ignored. Rules seen before any `User-agent` line
/// belong to `*`. Unknown directives such as `Sitemap` or `Crawl-delay` are
/// ignored apart from closing the current agent group.
pub fn parse_robots(text: &str, user_agent: &str) -> RobotsRules {
    let mut groups = AgentGroups::default();
    let mut current_agents: Vec<String> = Vec::new();
    let mut in_agent_run = false;

    for raw_line in text.lines() {
        let line = raw_line.split('#').next().unwrap_or("").trim();
        if line.is_empty() {
            continue;
        }

        let Some((key, value)) = line.split_once(':') else {
            continue;
        };
        let key = key.trim().to_lowercase();
        if key.is_empty() {
            continue;
        }
        let value = value.trim();

        match key.as_str() {
            "user-agent" => {
                let agent = value.to_lowercase();
                if agent.is_empty() {
                    continue;
                }
                if !in_agent_run {
                    current_agents.clear();
                }
                groups.entry(&agent);
                current_agents.push(agent);
                in_agent_run = true;
            }
            "allow" | "disallow" => {
                if current_agents.is_empty() {
                    current_agents.push("*".to_string());
                }
                for agent in &current_agents {
                    let rules = groups.entry(agent);
                    if key == "allow" {
                        rules.allow.push(value.to_string());
                    } else {
                        rules.disallow.push(value.to_string());
                    }
                }
                in_agent_run = false;
            }
            _ => in_agent_run = false,
        }
    }

    groups.select(user_agent)
}
