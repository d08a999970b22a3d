use crate::models::Record;

pub const DEFAULT_RETENTION: usize = 100;

/// Historique borné, records[0] = période la plus récente.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct History {
    records: Vec<Record>,
    retention: usize,
}

impl History {
    pub fn new(retention: usize) -> Self {
        Self {
            records: Vec::new(),
            retention: retention.max(1),
        }
    }

    pub fn from_records(records: Vec<Record>, retention: usize) -> Self {
        let mut history = Self::new(retention);
        history.replace(records);
        history
    }

    /// Remplace l'instantané entier (cas du flux qui renvoie toute la fenêtre).
    /// Trie par période décroissante et retire les périodes en double.
    pub fn replace(&mut self, mut records: Vec<Record>) {
        records.sort_by(|a, b| b.period.cmp(&a.period));
        records.dedup_by_key(|r| r.period);
        records.truncate(self.retention);
        self.records = records;
    }

    /// Ajoute un résultat en tête. Retourne false si la période n'est pas
    /// plus récente que la tête actuelle.
    pub fn prepend(&mut self, record: Record) -> bool {
        if let Some(latest) = self.records.first() {
            if record.period <= latest.period {
                return false;
            }
        }
        self.records.insert(0, record);
        self.records.truncate(self.retention);
        true
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn latest(&self) -> Option<&Record> {
        self.records.first()
    }

    pub fn next_period(&self) -> Option<u64> {
        self.latest().map(|r| r.period + 1)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn retention(&self) -> usize {
        self.retention
    }
}

impl Default for History {
    fn default() -> Self {
        Self::new(DEFAULT_RETENTION)
    }
}
