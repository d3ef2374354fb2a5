//! 命令行分词
//!
//! 一个 token 是以下三者之一（按优先级）：
//! - 单引号包围的片段 `'...'`
//! - 双引号包围的片段 `"..."`
//! - 连续的非空白字符
//!
//! 引号保留在 token 中，发送给服务端前由 [`unquote`] 去除。

/// 把一行输入切分为 token
///
/// 空行或全空白返回空 `Vec`。
///
/// # Example
///
/// ```
/// use rcli_client::tokenize::tokenize;
///
/// let tokens = tokenize(r#"SET key "hello world""#);
/// assert_eq!(tokens, vec!["SET", "key", "\"hello world\""]);
/// ```
pub fn tokenize(line: &str) -> Vec<String> {
    let chars: Vec<(usize, char)> = line.char_indices().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let (start, c) = chars[i];
        if c.is_whitespace() {
            i += 1;
            continue;
        }

        if c == '\'' || c == '"' {
            // 找同类的闭合引号；找不到时退化为非空白规则
            if let Some(offset) = chars[i + 1..].iter().position(|&(_, q)| q == c) {
                let close = i + 1 + offset;
                let end = chars[close].0 + c.len_utf8();
                tokens.push(line[start..end].to_string());
                i = close + 1;
                continue;
            }
        }

        let mut j = i;
        while j < chars.len() && !chars[j].1.is_whitespace() {
            j += 1;
        }
        let end = chars.get(j).map_or(line.len(), |&(idx, _)| idx);
        tokens.push(line[start..end].to_string());
        i = j;
    }

    tokens
}

/// 去掉一对匹配的外层引号
pub fn unquote(token: &str) -> &str {
    for quote in ['"', '\''] {
        if token.len() >= 2 && token.starts_with(quote) && token.ends_with(quote) {
            return &token[1..token.len() - 1];
        }
    }
    token
}
