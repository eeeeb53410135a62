//! 代码解析
//!
//! 根据用户输入的代码生成按优先级排列的候选代码列表，不涉及任何网络请求

use crate::models::LookupMode;

/// 常见交易所后缀，按尝试顺序排列（空字符串表示不加后缀）
pub const SUFFIXES: [&str; 17] = [
    "",
    ".NS", // 印度 NSE
    ".BO", // 印度 BSE
    ".SI", // 新加坡
    ".L",  // 伦敦
    ".PA", // 巴黎
    ".DE", // 德国 Xetra
    ".AX", // 澳大利亚
    ".TO", // 多伦多
    ".HK", // 香港
    ".MI", // 米兰
    ".KS", // 韩国
    ".MC", // 马德里
    ".SW", // 瑞士
    ".BR", // 布鲁塞尔
    ".IR", // 都柏林
    ".SA", // 巴西 / 沙特
];

/// 去除首尾空白并转为大写
pub fn normalize(raw: &str) -> String {
    raw.trim().to_uppercase()
}

/// 代码是否已经带有已知交易所后缀
pub fn has_known_suffix(symbol: &str) -> bool {
    SUFFIXES
        .iter()
        .filter(|suffix| !suffix.is_empty())
        .any(|suffix| symbol.ends_with(&suffix.to_uppercase()))
}

/// 生成候选代码列表
///
/// 结果非空、去重且保持首次出现的顺序：
/// - strict: 只有规范化后的代码本身
/// - fuzzy: 规范化后的代码在前；若没有已知后缀，再依次追加每个后缀
pub fn resolve(raw: &str, mode: LookupMode) -> Vec<String> {
    let symbol = normalize(raw);

    if mode == LookupMode::Strict || has_known_suffix(&symbol) {
        return vec![symbol];
    }

    let mut candidates: Vec<String> = Vec::with_capacity(SUFFIXES.len());
    for suffix in SUFFIXES {
        let candidate = format!("{}{}", symbol, suffix);
        if !candidates.contains(&candidate) {
            candidates.push(candidate);
        }
    }
    candidates
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_whitespace_and_case() {
        for mode in [LookupMode::Strict, LookupMode::Fuzzy] {
            assert_eq!(resolve("  aApl \t", mode), resolve("AAPL", mode));
        }
        assert_eq!(resolve(" tsla ", LookupMode::Strict), vec!["TSLA"]);
    }

    #[test]
    fn test_fuzzy_bare_symbol() {
        let candidates = resolve("AAPL", LookupMode::Fuzzy);
        assert_eq!(candidates.len(), 17);
        assert_eq!(candidates[0], "AAPL");
        assert_eq!(candidates[1], "AAPL.NS");
        assert_eq!(candidates[16], "AAPL.SA");

        let expected: Vec<String> = SUFFIXES
            .iter()
            .map(|suffix| format!("AAPL{}", suffix))
            .collect();
        assert_eq!(candidates, expected);
    }

    #[test]
    fn test_fuzzy_known_suffix() {
        assert_eq!(resolve("AAPL.L", LookupMode::Fuzzy), vec!["AAPL.L"]);
        assert_eq!(resolve("tatamotors.ns", LookupMode::Fuzzy), vec!["TATAMOTORS.NS"]);
        assert_eq!(resolve("d05.si", LookupMode::Fuzzy), vec!["D05.SI"]);
    }

    #[test]
    fn test_strict_is_identity() {
        assert_eq!(resolve("aapl", LookupMode::Strict), vec!["AAPL"]);
        assert_eq!(resolve("BRK-B", LookupMode::Strict), vec!["BRK-B"]);
    }

    #[test]
    fn test_candidates_are_unique() {
        // 空输入只会产生后缀本身，仍然不重复
        let candidates = resolve("", LookupMode::Fuzzy);
        assert_eq!(candidates[0], "");
        let mut seen = std::collections::HashSet::new();
        for candidate in &candidates {
            assert!(seen.insert(candidate), "{} 重复出现", candidate);
        }
    }

    #[test]
    fn test_has_known_suffix() {
        assert!(has_known_suffix("HSBA.L"));
        assert!(has_known_suffix("SHOP.TO"));
        assert!(!has_known_suffix("AAPL"));
        // 以后缀字母结尾但没有点号的不算
        assert!(!has_known_suffix("SNL"));
    }
}
