// Score containers: one sparse, ordered keyword -> count map per sector,
// and the corpus of all sectors in input order.

/// Keyword counts for one sector.
///
/// Sparse: a keyword is only present once it has matched at least once, so
/// a stored count is never zero. Keywords stay in first-match order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectorScores {
    pub sector: String,
    matches: Vec<(String, u32)>,
}

impl SectorScores {
    pub fn new(sector: impl Into<String>) -> Self {
        Self {
            sector: sector.into(),
            matches: Vec::new(),
        }
    }

    /// Add `count` matches for `keyword`. Zero counts are not recorded;
    /// a keyword seen again accumulates into its existing entry.
    pub fn record(&mut self, keyword: &str, count: u32) {
        if count == 0 {
            return;
        }
        match self.matches.iter_mut().find(|(k, _)| k == keyword) {
            Some((_, existing)) => *existing += count,
            None => self.matches.push((keyword.to_string(), count)),
        }
    }

    pub fn get(&self, keyword: &str) -> Option<u32> {
        self.matches
            .iter()
            .find(|(k, _)| k == keyword)
            .map(|(_, count)| *count)
    }

    /// `(keyword, count)` pairs in first-match order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, u32)> {
        self.matches.iter().map(|(k, c)| (k.as_str(), *c))
    }

    pub fn len(&self) -> usize {
        self.matches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.matches.is_empty()
    }

    /// Sum of all counts in this sector.
    pub fn total(&self) -> u64 {
        self.matches.iter().map(|(_, c)| u64::from(*c)).sum()
    }
}

/// Scores for every sector, in the order the sectors were supplied.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Corpus {
    sectors: Vec<SectorScores>,
}

impl Corpus {
    pub fn push(&mut self, scores: SectorScores) {
        self.sectors.push(scores);
    }

    pub fn get(&self, sector: &str) -> Option<&SectorScores> {
        self.sectors.iter().find(|s| s.sector == sector)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, SectorScores> {
        self.sectors.iter()
    }

    pub fn len(&self) -> usize {
        self.sectors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sectors.is_empty()
    }
}

impl<'a> IntoIterator for &'a Corpus {
    type Item = &'a SectorScores;
    type IntoIter = std::slice::Iter<'a, SectorScores>;

    fn into_iter(self) -> Self::IntoIter {
        self.sectors.iter()
    }
}

impl FromIterator<SectorScores> for Corpus {
    fn from_iter<T: IntoIterator<Item = SectorScores>>(iter: T) -> Self {
        Self {
            sectors: iter.into_iter().collect(),
        }
    }
}
