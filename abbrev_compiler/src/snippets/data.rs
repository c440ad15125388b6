//! Built-in snippet dictionaries
//!
//! Keys may hold several `|`-separated aliases; [`SnippetTable::from_pairs`]
//! splits them.

use crate::config::SnippetTable;
use std::sync::OnceLock;

/// Element aliases and multi-element shortcuts for every markup syntax
pub const MARKUP_SNIPPETS: &[(&str, &str)] = &[
    ("a", "a[href]"),
    ("a:blank", "a[href='http://${0}' target='_blank' rel='noopener noreferrer']"),
    ("a:link", "a[href='http://${0}']"),
    ("a:mail", "a[href='mailto:${0}']"),
    ("a:tel", "a[href='tel:+${0}']"),
    ("abbr", "abbr[title]"),
    ("acr|acronym", "acronym[title]"),
    ("base", "base[href]/"),
    ("basefont", "basefont/"),
    ("br", "br/"),
    ("frame", "frame/"),
    ("hr", "hr/"),
    ("bdo", "bdo[dir]"),
    ("bdo:r", "bdo[dir=rtl]"),
    ("bdo:l", "bdo[dir=ltr]"),
    ("col", "col/"),
    ("link", "link[rel=stylesheet href]/"),
    ("link:css", "link[href='${1:style}.css']"),
    ("link:print", "link[href='${1:print}.css' media=print]"),
    ("link:favicon", "link[rel='shortcut icon' type=image/x-icon href='${1:favicon.ico}']"),
    ("link:mf|link:manifest", "link[rel='manifest' href='${1:manifest.json}']"),
    ("link:touch", "link[rel=apple-touch-icon href='${1:favicon.png}']"),
    ("link:rss", "link[rel=alternate type=application/rss+xml title=RSS href='${1:rss.xml}']"),
    ("link:atom", "link[rel=alternate type=application/atom+xml title=Atom href='${1:atom.xml}']"),
    ("link:im|link:import", "link[rel=import href='${1:component}.html']"),
    ("meta", "meta/"),
    ("meta:utf", "meta[http-equiv=Content-Type content='text/html;charset=UTF-8']"),
    ("meta:vp", "meta[name=viewport content='width=${1:device-width}, initial-scale=${2:1.0}']"),
    ("meta:compat", "meta[http-equiv=X-UA-Compatible content='${1:IE=7}']"),
    ("meta:edge", "meta:compat[content='${1:ie=edge}']"),
    ("meta:redirect", "meta[http-equiv=refresh content='0; url=${1:http://example.com}']"),
    ("meta:refresh", "meta[http-equiv=refresh content='${1:5}']"),
    ("meta:kw", "meta[name=keywords content]"),
    ("meta:desc", "meta[name=description content]"),
    ("style", "style"),
    ("script", "script"),
    ("script:src", "script[src]"),
    ("script:module", "script[type=module src]"),
    ("img", "img[src alt]/"),
    ("img:s|img:srcset", "img[srcset src alt]"),
    ("img:z|img:sizes", "img[sizes srcset src alt]"),
    ("picture", "picture"),
    ("src|source", "source/"),
    ("src:sc|source:src", "source[src type]"),
    ("src:s|source:srcset", "source[srcset]"),
    ("src:t|source:type", "source[srcset type='${1:image/}']"),
    ("src:z|source:sizes", "source[sizes srcset]"),
    ("src:m|source:media", "source[media='(${1:min-width: })' srcset]"),
    ("src:mt|source:media:type", "source:media[type='${2:image/}']"),
    ("src:mz|source:media:sizes", "source:media[sizes srcset]"),
    ("src:zt|source:sizes:type", "source[sizes srcset type='${1:image/}']"),
    ("iframe", "iframe[src frameborder=0]"),
    ("embed", "embed[src type]/"),
    ("object", "object[data type]"),
    ("param", "param[name value]/"),
    ("map", "map[name]"),
    ("area", "area[shape coords href alt]/"),
    ("area:d", "area[shape=default]"),
    ("area:c", "area[shape=circle]"),
    ("area:r", "area[shape=rect]"),
    ("area:p", "area[shape=poly]"),
    ("form", "form[action]"),
    ("form:get", "form[method=get]"),
    ("form:post", "form[method=post]"),
    ("label", "label[for]"),
    ("input", "input[type=${1:text}]/"),
    ("inp", "input[name=${1} id=${1}]"),
    ("input:h|input:hidden", "input[type=hidden name]"),
    ("input:t|input:text", "inp[type=text]"),
    ("input:search", "inp[type=search]"),
    ("input:email", "inp[type=email]"),
    ("input:url", "inp[type=url]"),
    ("input:p|input:password", "inp[type=password]"),
    ("input:datetime", "inp[type=datetime]"),
    ("input:date", "inp[type=date]"),
    ("input:datetime-local", "inp[type=datetime-local]"),
    ("input:month", "inp[type=month]"),
    ("input:week", "inp[type=week]"),
    ("input:time", "inp[type=time]"),
    ("input:tel", "inp[type=tel]"),
    ("input:number", "inp[type=number]"),
    ("input:color", "inp[type=color]"),
    ("input:c|input:checkbox", "inp[type=checkbox]"),
    ("input:r|input:radio", "inp[type=radio]"),
    ("input:range", "inp[type=range]"),
    ("input:f|input:file", "inp[type=file]"),
    ("input:s|input:submit", "input[type=submit value]"),
    ("input:i|input:image", "input[type=image src alt]"),
    ("input:b|input:btn|input:button", "input[type=button value]"),
    ("input:reset", "input:button[type=reset]"),
    ("isindex", "isindex/"),
    ("select", "select[name=${1} id=${1}]"),
    ("select:d|select:disabled", "select[disabled.]"),
    ("opt|option", "option[value]"),
    ("textarea", "textarea[name=${1} id=${1}]"),
    ("tarea:c|textarea:cols", "textarea[name=${1} id=${1} cols=${2:30}]"),
    ("tarea:r|textarea:rows", "textarea[name=${1} id=${1} rows=${3:10}]"),
    ("tarea:cr|textarea:cols:rows", "textarea[name=${1} id=${1} cols=${2:30} rows=${3:10}]"),
    ("marquee", "marquee[behavior direction]"),
    ("menu:c|menu:context", "menu[type=context]"),
    ("menu:t|menu:toolbar", "menu[type=toolbar]"),
    ("video", "video[src]"),
    ("audio", "audio[src]"),
    ("html:xml", "html[xmlns=http://www.w3.org/1999/xhtml]"),
    ("keygen", "keygen/"),
    ("command", "command/"),
    ("btn:s|button:s|button:submit", "button[type=submit]"),
    ("btn:r|button:r|button:reset", "button[type=reset]"),
    ("btn:b|button:b|button:button", "button[type=button]"),
    ("btn:d|button:d|button:disabled", "button[disabled.]"),
    ("fst:d|fset:d|fieldset:d|fieldset:disabled", "fieldset[disabled.]"),
    ("bq", "blockquote"),
    ("fig", "figure"),
    ("figc", "figcaption"),
    ("pic", "picture"),
    ("ifr", "iframe"),
    ("emb", "embed"),
    ("obj", "object"),
    ("cap", "caption"),
    ("colg", "colgroup"),
    ("fst", "fieldset"),
    ("btn", "button"),
    ("optg", "optgroup"),
    ("tarea", "textarea"),
    ("leg", "legend"),
    ("sect", "section"),
    ("art", "article"),
    ("hdr", "header"),
    ("ftr", "footer"),
    ("adr", "address"),
    ("dlg", "dialog"),
    ("str", "strong"),
    ("prog", "progress"),
    ("mn", "main"),
    ("tem", "template"),
    ("fset", "fieldset"),
    ("datal", "datalist"),
    ("kg", "keygen"),
    ("out", "output"),
    ("det", "details"),
    ("sum", "summary"),
    ("cmd", "command"),
    ("data", "data[value]"),
    ("meter", "meter[value]"),
    ("time", "time[datetime]"),
    ("ri:d|ri:dpr", "img:s"),
    ("ri:v|ri:viewport", "img:z"),
    ("ri:a|ri:art", "pic>src:m+img"),
    ("ri:t|ri:type", "pic>src:t+img"),
    ("!!!", "{<!DOCTYPE html>}"),
    ("doc", "html[lang=${lang}]>(head>meta[charset=${charset}]+meta:vp+title{${1:Document}})+body"),
    ("!|html:5", "!!!+doc"),
    ("c", "{<!-- ${0} -->}"),
    ("cc:ie", "{<!--[if IE]>${0}<![endif]-->}"),
    ("cc:noie", "{<!--[if !IE]><!-->${0}<!--<![endif]-->}"),
];

/// CSS property shorthands (`name:kw1|kw2`) and raw code snippets
pub const STYLESHEET_SNIPPETS: &[(&str, &str)] = &[
    ("@f", "@font-face {\n\tfont-family: ${1};\n\tsrc: url(${2});\n}"),
    ("@ff", "@font-face {\n\tfont-family: '${1:FontName}';\n\tsrc: url('${2:FileName}.eot');\n\tsrc: url('${2:FileName}.eot?#iefix') format('embedded-opentype'),\n\t\t url('${2:FileName}.woff') format('woff'),\n\t\t url('${2:FileName}.ttf') format('truetype'),\n\t\t url('${2:FileName}.svg#${1:FontName}') format('svg');\n\tfont-style: ${3:normal};\n\tfont-weight: ${4:normal};\n}"),
    ("@i|@import", "@import url(${0});"),
    ("@kf", "@keyframes ${1:identifier} {\n\t${2}\n}"),
    ("@m|@media", "@media ${1:screen} {\n\t${0}\n}"),
    ("ac", "align-content:start|end|flex-start|flex-end|center|space-between|space-around|stretch|space-evenly"),
    ("ai", "align-items:start|end|flex-start|flex-end|center|baseline|stretch"),
    ("anim", "animation:${1:name} ${2:duration} ${3:timing-function} ${4:delay} ${5:iteration-count} ${6:direction} ${7:fill-mode}"),
    ("animdel", "animation-delay:time"),
    ("animdir", "animation-direction:normal|reverse|alternate|alternate-reverse"),
    ("animdur", "animation-duration:${1:0}s"),
    ("animfm", "animation-fill-mode:both|forwards|backwards"),
    ("animic", "animation-iteration-count:1|infinite"),
    ("animn", "animation-name"),
    ("animps", "animation-play-state:running|paused"),
    ("animtf", "animation-timing-function:linear|ease|ease-in|ease-out|ease-in-out|cubic-bezier(${1:0.1}, ${2:0.7}, ${3:1.0}, ${3:0.1})"),
    ("ap", "appearance:none"),
    ("as", "align-self:start|end|auto|flex-start|flex-end|center|baseline|stretch"),
    ("b", "bottom"),
    ("bd", "border:${1:1px} ${2:solid} ${3:#000}"),
    ("bdb", "border-bottom:${1:1px} ${2:solid} ${3:#000}"),
    ("bdbc", "border-bottom-color:${1:#000}"),
    ("bdbi", "border-bottom-image:url(${0})"),
    ("bdbk", "border-break:close"),
    ("bdbli", "border-bottom-left-image:url(${0})|continue"),
    ("bdblrs", "border-bottom-left-radius"),
    ("bdbri", "border-bottom-right-image:url(${0})|continue"),
    ("bdbrrs", "border-bottom-right-radius"),
    ("bdbs", "border-bottom-style"),
    ("bdbw", "border-bottom-width"),
    ("bdc", "border-color:${1:#000}"),
    ("bdci", "border-corner-image:url(${0})|continue"),
    ("bdcl", "border-collapse:collapse|separate"),
    ("bdf", "border-fit:repeat|clip|scale|stretch|overwrite|overflow|space"),
    ("bdi", "border-image:url(${0})"),
    ("bdl", "border-left:${1:1px} ${2:solid} ${3:#000}"),
    ("bdlc", "border-left-color:${1:#000}"),
    ("bdlen", "border-length"),
    ("bdli", "border-left-image:url(${0})"),
    ("bdls", "border-left-style"),
    ("bdlw", "border-left-width"),
    ("bdr", "border-right:${1:1px} ${2:solid} ${3:#000}"),
    ("bdrc", "border-right-color:${1:#000}"),
    ("bdri", "border-right-image:url(${0})"),
    ("bdrs", "border-radius"),
    ("bdrst", "border-right-style"),
    ("bdrw", "border-right-width"),
    ("bds", "border-style:none|hidden|dotted|dashed|solid|double|dot-dash|dot-dot-dash|wave|groove|ridge|inset|outset"),
    ("bdsp", "border-spacing"),
    ("bdt", "border-top:${1:1px} ${2:solid} ${3:#000}"),
    ("bdtc", "border-top-color:${1:#000}"),
    ("bdti", "border-top-image:url(${0})"),
    ("bdtli", "border-top-left-image:url(${0})|continue"),
    ("bdtlrs", "border-top-left-radius"),
    ("bdtri", "border-top-right-image:url(${0})|continue"),
    ("bdtrrs", "border-top-right-radius"),
    ("bdts", "border-top-style"),
    ("bdtw", "border-top-width"),
    ("bdw", "border-width"),
    ("bbs", "border-block-start"),
    ("bbe", "border-block-end"),
    ("bis", "border-inline-start"),
    ("bie", "border-inline-end"),
    ("bfv", "backface-visibility:hidden|visible"),
    ("bg", "background:${1:#000}"),
    ("bg:n", "background: none"),
    ("bga", "background-attachment:fixed|scroll"),
    ("bgbk", "background-break:bounding-box|each-box|continuous"),
    ("bgc", "background-color:${1:#fff}"),
    ("bgcp", "background-clip:padding-box|border-box|content-box|no-clip"),
    ("bgi", "background-image:url(${0})"),
    ("bgo", "background-origin:padding-box|border-box|content-box"),
    ("bgp", "background-position:${1:0} ${2:0}"),
    ("bgpx", "background-position-x"),
    ("bgpy", "background-position-y"),
    ("bgr", "background-repeat:no-repeat|repeat-x|repeat-y|space|round"),
    ("bgsz", "background-size:contain|cover"),
    ("bs", "block-size"),
    ("bxsh", "box-shadow:${1:inset }${2:hoff} ${3:voff} ${4:blur} ${5:#000}|none"),
    ("bxsz", "box-sizing:border-box|content-box|border-box"),
    ("c", "color:${1:#000}"),
    ("cg", "column-gap"),
    ("cr", "color:rgb(${1:0}, ${2:0}, ${3:0})"),
    ("cra", "color:rgba(${1:0}, ${2:0}, ${3:0}, ${4:.5})"),
    ("cl", "clear:both|left|right|none"),
    ("cm", "/* ${0} */"),
    ("cnt", "content:'${0}'|normal|open-quote|no-open-quote|close-quote|no-close-quote|attr(${0})|counter(${0})|counters(${0})"),
    ("coi", "counter-increment"),
    ("colm", "columns"),
    ("colmc", "column-count"),
    ("colmf", "column-fill"),
    ("colmg", "column-gap"),
    ("colmr", "column-rule"),
    ("colmrc", "column-rule-color"),
    ("colmrs", "column-rule-style"),
    ("colmrw", "column-rule-width"),
    ("colms", "column-span"),
    ("colmw", "column-width"),
    ("cor", "counter-reset"),
    ("cp", "clip:auto|rect(${1:top} ${2:right} ${3:bottom} ${4:left})"),
    ("cps", "caption-side:top|bottom"),
    ("cur", "cursor:pointer|auto|default|crosshair|hand|help|move|pointer|text"),
    ("d", "display:block|none|flex|inline-flex|inline|inline-block|grid|inline-grid|subgrid|list-item|run-in|contents|table|inline-table|table-caption|table-column|table-column-group|table-header-group|table-footer-group|table-row|table-row-group|table-cell|ruby|ruby-base|ruby-base-group|ruby-text|ruby-text-group"),
    ("ec", "empty-cells:show|hide"),
    ("f", "font:${1:1em} ${2:sans-serif}"),
    ("fd", "font-display:auto|block|swap|fallback|optional"),
    ("fef", "font-effect:none|engrave|emboss|outline"),
    ("fem", "font-emphasize"),
    ("femp", "font-emphasize-position:before|after"),
    ("fems", "font-emphasize-style:none|accent|dot|circle|disc"),
    ("ff", "font-family:serif|sans-serif|cursive|fantasy|monospace"),
    ("fft", "font-family:\"Times New Roman\", Times, Baskerville, Georgia, serif"),
    ("ffa", "font-family:Arial, \"Helvetica Neue\", Helvetica, sans-serif"),
    ("ffv", "font-family:Verdana, Geneva, sans-serif"),
    ("fl", "float:left|right|none"),
    ("fs", "font-style:italic|normal|oblique"),
    ("fsm", "font-smoothing:antialiased|subpixel-antialiased|none"),
    ("fst", "font-stretch:normal|ultra-condensed|extra-condensed|condensed|semi-condensed|semi-expanded|expanded|extra-expanded|ultra-expanded"),
    ("fv", "font-variant:normal|small-caps"),
    ("fvs", "font-variation-settings:normal|inherit|initial|unset"),
    ("fw", "font-weight:normal|bold|bolder|lighter"),
    ("fx", "flex"),
    ("fxb", "flex-basis:fill|max-content|min-content|fit-content|content"),
    ("fxd", "flex-direction:row|row-reverse|column|column-reverse"),
    ("fxf", "flex-flow"),
    ("fxg", "flex-grow"),
    ("fxsh", "flex-shrink"),
    ("fxw", "flex-wrap:nowrap|wrap|wrap-reverse"),
    ("fsz", "font-size"),
    ("fsza", "font-size-adjust"),
    ("g", "gap"),
    ("gtc", "grid-template-columns:repeat(${0})|minmax()"),
    ("gtr", "grid-template-rows:repeat(${0})|minmax()"),
    ("gta", "grid-template-areas"),
    ("gt", "grid-template"),
    ("gg", "grid-gap"),
    ("gcg", "grid-column-gap"),
    ("grg", "grid-row-gap"),
    ("gac", "grid-auto-columns:auto|minmax()"),
    ("gar", "grid-auto-rows:auto|minmax()"),
    ("gaf", "grid-auto-flow:row|column|dense|inherit|initial|unset"),
    ("gd", "grid"),
    ("gc", "grid-column"),
    ("gcs", "grid-column-start"),
    ("gce", "grid-column-end"),
    ("gr", "grid-row"),
    ("grs", "grid-row-start"),
    ("gre", "grid-row-end"),
    ("ga", "grid-area"),
    ("h", "height"),
    ("is", "inline-size"),
    ("jc", "justify-content:start|end|stretch|flex-start|flex-end|center|space-between|space-around|space-evenly"),
    ("ji", "justify-items:start|end|center|stretch"),
    ("js", "justify-self:start|end|center|stretch"),
    ("l", "left"),
    ("lg", "background-image:linear-gradient(${1})"),
    ("lh", "line-height"),
    ("lis", "list-style"),
    ("lisi", "list-style-image"),
    ("lisp", "list-style-position:inside|outside"),
    ("list", "list-style-type:disc|circle|square|decimal|decimal-leading-zero|lower-roman|upper-roman"),
    ("lts", "letter-spacing:normal"),
    ("m", "margin"),
    ("mah", "max-height"),
    ("mar", "max-resolution"),
    ("maw", "max-width"),
    ("mb", "margin-bottom"),
    ("mih", "min-height"),
    ("mir", "min-resolution"),
    ("miw", "min-width"),
    ("ml", "margin-left"),
    ("mr", "margin-right"),
    ("mt", "margin-top"),
    ("mbs", "margin-block-start"),
    ("mbe", "margin-block-end"),
    ("mis", "margin-inline-start"),
    ("mie", "margin-inline-end"),
    ("ol", "outline"),
    ("olc", "outline-color:${1:#000}|invert"),
    ("olo", "outline-offset"),
    ("ols", "outline-style:none|dotted|dashed|solid|double|groove|ridge|inset|outset"),
    ("olw", "outline-width:thin|medium|thick"),
    ("op|opa", "opacity"),
    ("ord", "order"),
    ("ori", "orientation:landscape|portrait"),
    ("orp", "orphans"),
    ("ov", "overflow:hidden|visible|hidden|scroll|auto"),
    ("ovs", "overflow-style:scrollbar|auto|scrollbar|panner|move|marquee"),
    ("ovx", "overflow-x:hidden|visible|hidden|scroll|auto"),
    ("ovy", "overflow-y:hidden|visible|hidden|scroll|auto"),
    ("p", "padding"),
    ("pb", "padding-bottom"),
    ("pgba", "page-break-after:auto|always|left|right"),
    ("pgbb", "page-break-before:auto|always|left|right"),
    ("pgbi", "page-break-inside:auto|avoid"),
    ("pl", "padding-left"),
    ("pos", "position:relative|absolute|relative|fixed|static"),
    ("pr", "padding-right"),
    ("pt", "padding-top"),
    ("pbs", "padding-block-start"),
    ("pbe", "padding-block-end"),
    ("pis", "padding-inline-start"),
    ("pie", "padding-inline-end"),
    ("spbs", "scroll-padding-block-start"),
    ("spbe", "scroll-padding-block-end"),
    ("spis", "scroll-padding-inline-start"),
    ("spie", "scroll-padding-inline-end"),
    ("q", "quotes"),
    ("qen", "quotes:'\\201C' '\\201D' '\\2018' '\\2019'"),
    ("qru", "quotes:'\\00AB' '\\00BB' '\\201E' '\\201C'"),
    ("r", "right"),
    ("rg", "row-gap"),
    ("rsz", "resize:none|both|horizontal|vertical"),
    ("t", "top"),
    ("ta", "text-align:left|center|right|justify"),
    ("tal", "text-align-last:left|center|right"),
    ("tbl", "table-layout:fixed"),
    ("td", "text-decoration:none|underline|overline|line-through"),
    ("te", "text-emphasis:none|accent|dot|circle|disc|before|after"),
    ("th", "text-height:auto|font-size|text-size|max-size"),
    ("ti", "text-indent"),
    ("tj", "text-justify:auto|inter-word|inter-ideograph|inter-cluster|distribute|kashida|tibetan"),
    ("to", "text-outline:${1:0} ${2:0} ${3:#000}"),
    ("tov", "text-overflow:ellipsis|clip"),
    ("tr", "text-replace"),
    ("trf", "transform:${1}|skewX(${1:angle})|skewY(${1:angle})|scale(${1:x}, ${2:y})|scaleX(${1:x})|scaleY(${1:y})|scaleZ(${1:z})|scale3d(${1:x}, ${2:y}, ${3:z})|rotate(${1:angle})|rotateX(${1:angle})|rotateY(${1:angle})|rotateZ(${1:angle})|translate(${1:x}, ${2:y})|translateX(${1:x})|translateY(${1:y})|translateZ(${1:z})|translate3d(${1:tx}, ${2:ty}, ${3:tz})"),
    ("trfo", "transform-origin"),
    ("trfs", "transform-style:preserve-3d"),
    ("trs", "transition:${1:prop} ${2:time}"),
    ("trsde", "transition-delay:${1:time}"),
    ("trsdu", "transition-duration:${1:time}"),
    ("trsp", "transition-property:${1:prop}"),
    ("trstf", "transition-timing-function:${1:fn}"),
    ("tsh", "text-shadow:${1:hoff} ${2:voff} ${3:blur} ${4:#000}"),
    ("tt", "text-transform:uppercase|lowercase|capitalize|none"),
    ("tw", "text-wrap:none|normal|unrestricted|suppress"),
    ("us", "user-select:none"),
    ("v", "visibility:hidden|visible|collapse"),
    ("va", "vertical-align:top|super|text-top|middle|baseline|bottom|text-bottom|sub"),
    ("w|wid", "width"),
    ("whs", "white-space:nowrap|pre|pre-wrap|pre-line|normal"),
    ("whsc", "white-space-collapse:normal|keep-all|loose|break-strict|break-all"),
    ("wido", "widows"),
    ("wm", "writing-mode:lr-tb|lr-tb|lr-bt|rl-tb|rl-bt|tb-rl|tb-lr|bt-lr|bt-rl"),
    ("wob", "word-break:normal|keep-all|break-all"),
    ("wos", "word-spacing"),
    ("wow", "word-wrap:none|unrestricted|suppress|break-word|normal"),
    ("z", "z-index"),
    ("zom", "zoom:1"),
];

/// XSLT element shortcuts, layered on top of the markup dictionary
pub const XSL_SNIPPETS: &[(&str, &str)] = &[
    ("tm|tmatch", "xsl:template[match mode]"),
    ("tn|tname", "xsl:template[name]"),
    ("call", "xsl:call-template[name]"),
    ("ap", "xsl:apply-templates[select mode]"),
    ("api", "xsl:apply-imports"),
    ("imp", "xsl:import[href]"),
    ("inc", "xsl:include[href]"),
    ("ch", "xsl:choose"),
    ("wh|xsl:when", "xsl:when[test]"),
    ("ot", "xsl:otherwise"),
    ("if", "xsl:if[test]"),
    ("par", "xsl:param[name]"),
    ("pare", "xsl:param[name select]"),
    ("var", "xsl:variable[name]"),
    ("vare", "xsl:variable[name select]"),
    ("wp", "xsl:with-param[name select]"),
    ("key", "xsl:key[name match use]"),
    ("elem", "xsl:element[name]"),
    ("attr", "xsl:attribute[name]"),
    ("attrs", "xsl:attribute-set[name]"),
    ("cp", "xsl:copy[select]"),
    ("co", "xsl:copy-of[select]"),
    ("val", "xsl:value-of[select]"),
    ("for|each", "xsl:for-each[select]"),
    ("tex", "xsl:text"),
    ("com", "xsl:comment"),
    ("msg", "xsl:message[terminate=no]"),
    ("fall", "xsl:fallback"),
    ("num", "xsl:number[value]"),
    ("nam", "namespace-alias[stylesheet-prefix result-prefix]"),
    ("pres", "xsl:preserve-space[elements]"),
    ("strip", "xsl:strip-space[elements]"),
    ("proc", "xsl:processing-instruction[name]"),
    ("sort", "xsl:sort[select order]"),
    ("choose", "xsl:choose>xsl:when+xsl:otherwise"),
    ("xsl", "!!!+xsl:stylesheet[version=1.0 xmlns:xsl=http://www.w3.org/1999/XSL/Transform]>{\n|}"),
    ("!!!", "{<?xml version=\"1.0\" encoding=\"UTF-8\"?>}"),
];

/// Pug overrides
pub const PUG_SNIPPETS: &[(&str, &str)] = &[
    ("!!!", "{doctype html}"),
];

/// Variables available to `${name}` fields in snippets
pub const DEFAULT_VARIABLES: &[(&str, &str)] = &[
    ("lang", "en"),
    ("locale", "en-US"),
    ("charset", "UTF-8"),
    ("indentation", "\t"),
    ("newline", "\n"),
];

/// Standard HTML tag names considered worth an expansion hint
pub const HTML_TAGS: &[&str] = &[
    "a", "abbr", "address", "area", "article", "aside", "audio", "b", "base", "bdi", "bdo",
    "blockquote", "body", "br", "button", "canvas", "caption", "cite", "code", "col", "colgroup",
    "data", "datalist", "dd", "del", "details", "dfn", "dialog", "div", "dl", "dt", "em", "embed",
    "fieldset", "figcaption", "figure", "footer", "form", "h1", "h2", "h3", "h4", "h5", "h6",
    "head", "header", "hgroup", "hr", "html", "i", "iframe", "img", "input", "ins", "kbd", "label",
    "legend", "li", "link", "main", "map", "mark", "meta", "meter", "nav", "noscript", "object",
    "ol", "optgroup", "option", "output", "p", "param", "picture", "pre", "progress", "q", "rp",
    "rt", "ruby", "s", "samp", "script", "section", "select", "small", "source", "span", "strong",
    "style", "sub", "summary", "sup", "table", "tbody", "td", "template", "textarea", "tfoot",
    "th", "thead", "time", "title", "tr", "track", "u", "ul", "var", "video", "wbr",
];

macro_rules! static_table {
    ($name:ident, $source:expr) => {
        pub fn $name() -> &'static SnippetTable {
            static TABLE: OnceLock<SnippetTable> = OnceLock::new();
            TABLE.get_or_init(|| SnippetTable::from_pairs($source))
        }
    };
}

static_table!(markup_snippets, MARKUP_SNIPPETS);
static_table!(stylesheet_snippets, STYLESHEET_SNIPPETS);
static_table!(xsl_snippets, XSL_SNIPPETS);
static_table!(pug_snippets, PUG_SNIPPETS);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_aliases_are_split() {
        let table = markup_snippets();
        assert_eq!(table.get("acr"), Some("acronym[title]"));
        assert_eq!(table.get("acronym"), Some("acronym[title]"));
        assert_eq!(table.get("!"), Some("!!!+doc"));
    }

    #[test]
    fn test_stylesheet_table_order_is_preserved() {
        let first = stylesheet_snippets().keys().next();
        assert_eq!(first, Some("@f"));
        assert!(stylesheet_snippets().contains_key("m"));
    }

    #[test]
    fn test_html_tags_are_lowercase() {
        assert!(HTML_TAGS.iter().all(|t| t.chars().all(|c| !c.is_uppercase())));
        assert!(HTML_TAGS.contains(&"section"));
    }
}
