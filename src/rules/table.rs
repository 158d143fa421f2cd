//! The standard vSQL grammar.
//!
//! Each entry is `(node type, rule spec, SQL template)`. Entries are
//! registered in order, so a more specific rule must come before a more
//! general one covering the same operand types.

use crate::types::NodeType as N;

macro_rules! intlike {
    () => {
        "BOOL_INT"
    };
}

macro_rules! numberlike {
    () => {
        "BOOL_INT_NUMBER"
    };
}

/// Types stored as numbers in the database.
macro_rules! numberstored {
    () => {
        "BOOL_INT_NUMBER_COLOR_DATEDELTA_DATETIMEDELTA_MONTHDELTA"
    };
}

macro_rules! text {
    () => {
        "STR_CLOB"
    };
}

macro_rules! list {
    () => {
        "INTLIST_NUMBERLIST_STRLIST_CLOBLIST_DATELIST_DATETIMELIST"
    };
}

macro_rules! set {
    () => {
        "INTSET_NUMBERSET_STRSET_DATESET_DATETIMESET"
    };
}

macro_rules! any {
    () => {
        "NULL_BOOL_INT_NUMBER_STR_CLOB_COLOR_GEO_DATE_DATETIME_DATEDELTA_DATETIMEDELTA_MONTHDELTA_NULLLIST_INTLIST_NUMBERLIST_STRLIST_CLOBLIST_DATELIST_DATETIMELIST_NULLSET_INTSET_NUMBERSET_STRSET_DATESET_DATETIMESET"
    };
}

/// Field references and constants have rules too. Their templates are never
/// used, the rules only make them show up in rule listings.
#[rustfmt::skip]
pub static STANDARD_RULES: &[(N, &str, &str)] = &[
    // constants
    (N::Field, "NULL", ""),
    (N::ConstNone, "NULL", ""),
    (N::ConstBool, "BOOL", ""),
    (N::ConstInt, "INT", ""),
    (N::ConstNumber, "NUMBER", ""),
    (N::ConstStr, "STR", ""),
    (N::ConstClob, "CLOB", ""),
    (N::ConstColor, "COLOR", ""),
    (N::ConstDate, "DATE", ""),
    (N::ConstDateTime, "DATETIME", ""),

    // today()
    (N::Func, "DATE <- today()", "trunc(sysdate)"),

    // now()
    (N::Func, "DATETIME <- now()", "sysdate"),

    // bool()
    (N::Func, "BOOL <- bool()", "0"),
    (N::Func, "BOOL <- bool(NULL)", "0"),
    (N::Func, "BOOL <- bool(BOOL)", "{s1}"),
    (N::Func, "BOOL <- bool(INT_NUMBER_DATEDELTA_DATETIMEDELTA_MONTHDELTA_NULLLIST_NULLSET)", "(case when nvl({s1}, 0) = 0 then 0 else 1 end)"),
    (N::Func, "BOOL <- bool(DATE_DATETIME_STR_COLOR_GEO)", "(case when {s1} is null then 0 else 1 end)"),
    (N::Func, concat!("BOOL <- bool(", any!(), ")"), "vsqlimpl_pkg.bool_{t1}({s1})"),

    // int()
    (N::Func, "INT <- int()", "0"),
    (N::Func, concat!("INT <- int(", intlike!(), ")"), "{s1}"),
    (N::Func, "INT <- int(NUMBER_STR_CLOB)", "vsqlimpl_pkg.int_{t1}({s1})"),

    // float()
    (N::Func, "NUMBER <- float()", "0.0"),
    (N::Func, concat!("NUMBER <- float(", numberlike!(), ")"), "{s1}"),
    (N::Func, concat!("NUMBER <- float(", text!(), ")"), "vsqlimpl_pkg.float_{t1}({s1})"),

    // geo()
    (N::Func, concat!("GEO <- geo(", numberlike!(), ", ", numberlike!(), ")"), "vsqlimpl_pkg.geo_number_number_str({s1}, {s2}, null)"),
    (N::Func, concat!("GEO <- geo(", numberlike!(), ", ", numberlike!(), ", STR)"), "vsqlimpl_pkg.geo_number_number_str({s1}, {s2}, {s3})"),

    // str()
    (N::Func, "STR <- str()", "null"),
    (N::Func, "STR <- str(NULL)", "null"),
    (N::Func, "STR <- str(STR)", "{s1}"),
    (N::Func, "CLOB <- str(CLOB)", "{s1}"),
    (N::Func, "STR <- str(BOOL)", "(case {s1} when 0 then 'False' when null then 'None' else 'True' end)"),
    (N::Func, "STR <- str(INT)", "to_char({s1})"),
    (N::Func, "STR <- str(NUMBER)", "vsqlimpl_pkg.str_number({s1})"),
    (N::Func, "STR <- str(GEO)", "vsqlimpl_pkg.repr_geo({s1})"),
    (N::Func, "STR <- str(DATE)", "to_char({s1}, 'YYYY-MM-DD')"),
    (N::Func, "STR <- str(DATETIME)", "to_char({s1}, 'YYYY-MM-DD HH24:MI:SS')"),
    (N::Func, "STR <- str(NULLLIST)", "vsqlimpl_pkg.repr_nulllist({s1})"),
    (N::Func, "STR <- str(DATELIST)", "vsqlimpl_pkg.repr_datelist({s1})"),
    (N::Func, concat!("STR <- str(", list!(), ")"), "vsqlimpl_pkg.repr_{t1}({s1})"),
    (N::Func, "STR <- str(NULLSET)", "vsqlimpl_pkg.repr_nullset({s1})"),
    (N::Func, "STR <- str(INTSET)", "vsqlimpl_pkg.repr_intset({s1})"),
    (N::Func, "STR <- str(NUMBERSET)", "vsqlimpl_pkg.repr_numberset({s1})"),
    (N::Func, "STR <- str(STRSET)", "vsqlimpl_pkg.repr_strset({s1})"),
    (N::Func, "STR <- str(DATESET)", "vsqlimpl_pkg.repr_dateset({s1})"),
    (N::Func, "STR <- str(DATETIMESET)", "vsqlimpl_pkg.repr_datetimeset({s1})"),
    (N::Func, concat!("STR <- str(", any!(), ")"), "vsqlimpl_pkg.str_{t1}({s1})"),

    // repr()
    (N::Func, "STR <- repr(NULL)", "'None'"),
    (N::Func, "STR <- repr(BOOL)", "(case {s1} when 0 then 'False' when null then 'None' else 'True' end)"),
    (N::Func, "CLOB <- repr(CLOB_CLOBLIST)", "vsqlimpl_pkg.repr_{t1}({s1})"),
    (N::Func, "STR <- repr(DATE)", "vsqlimpl_pkg.repr_date({s1})"),
    (N::Func, "STR <- repr(DATELIST)", "vsqlimpl_pkg.repr_datelist({s1})"),
    (N::Func, "STR <- repr(NULLSET)", "vsqlimpl_pkg.repr_nullset({s1})"),
    (N::Func, "STR <- repr(INTSET)", "vsqlimpl_pkg.repr_intset({s1})"),
    (N::Func, "STR <- repr(NUMBERSET)", "vsqlimpl_pkg.repr_numberset({s1})"),
    (N::Func, "STR <- repr(STRSET)", "vsqlimpl_pkg.repr_strset({s1})"),
    (N::Func, "STR <- repr(DATESET)", "vsqlimpl_pkg.repr_dateset({s1})"),
    (N::Func, "STR <- repr(DATETIMESET)", "vsqlimpl_pkg.repr_datetimeset({s1})"),
    (N::Func, concat!("STR <- repr(", any!(), ")"), "vsqlimpl_pkg.repr_{t1}({s1})"),

    // date()
    (N::Func, "DATE <- date(INT, INT, INT)", "vsqlimpl_pkg.date_int({s1}, {s2}, {s3})"),
    (N::Func, "DATE <- date(DATETIME)", "trunc({s1})"),

    // datetime()
    (N::Func, "DATETIME <- datetime(INT, INT, INT)", "vsqlimpl_pkg.datetime_int({s1}, {s2}, {s3})"),
    (N::Func, "DATETIME <- datetime(INT, INT, INT, INT)", "vsqlimpl_pkg.datetime_int({s1}, {s2}, {s3}, {s4})"),
    (N::Func, "DATETIME <- datetime(INT, INT, INT, INT, INT)", "vsqlimpl_pkg.datetime_int({s1}, {s2}, {s3}, {s4}, {s5})"),
    (N::Func, "DATETIME <- datetime(INT, INT, INT, INT, INT, INT)", "vsqlimpl_pkg.datetime_int({s1}, {s2}, {s3}, {s4}, {s5}, {s6})"),
    (N::Func, "DATETIME <- datetime(DATE)", "{s1}"),
    (N::Func, "DATETIME <- datetime(DATE, INT)", "({s1} + {s2}/24)"),
    (N::Func, "DATETIME <- datetime(DATE, INT, INT)", "({s1} + {s2}/24 + {s3}/24/60)"),
    (N::Func, "DATETIME <- datetime(DATE, INT, INT, INT)", "({s1} + {s2}/24 + {s3}/24/60 + {s4}/24/60/60)"),

    // len()
    (N::Func, concat!("INT <- len(", text!(), ")"), "nvl(length({s1}), 0)"),
    (N::Func, "INT <- len(NULLLIST)", "{s1}"),
    (N::Func, concat!("INT <- len(", list!(), ")"), "vsqlimpl_pkg.len_{t1}({s1})"),
    (N::Func, "INT <- len(NULLSET)", "case when {s1} > 0 then 1 else {s1} end"),
    (N::Func, concat!("INT <- len(", set!(), ")"), "vsqlimpl_pkg.len_{t1}({s1})"),

    // timedelta()
    (N::Func, "DATEDELTA <- timedelta()", "0"),
    (N::Func, "DATEDELTA <- timedelta(INT)", "{s1}"),
    (N::Func, "DATETIMEDELTA <- timedelta(INT, INT)", "({s1} + {s2}/86400)"),

    // monthdelta()
    (N::Func, "MONTHDELTA <- monthdelta()", "0"),
    (N::Func, "MONTHDELTA <- monthdelta(INT)", "{s1}"),

    // years()
    (N::Func, "MONTHDELTA <- years(INT)", "(12 * {s1})"),

    // months()
    (N::Func, "MONTHDELTA <- months(INT)", "{s1}"),

    // weeks()
    (N::Func, "DATEDELTA <- weeks(INT)", "(7 * {s1})"),

    // days()
    (N::Func, "DATEDELTA <- days(INT)", "{s1}"),

    // hours()
    (N::Func, "DATETIMEDELTA <- hours(INT)", "({s1} / 24)"),

    // minutes()
    (N::Func, "DATETIMEDELTA <- minutes(INT)", "({s1} / 1440)"),

    // seconds()
    (N::Func, "DATETIMEDELTA <- seconds(INT)", "({s1} / 86400)"),

    // md5()
    (N::Func, "STR <- md5(STR)", "lower(rawtohex(dbms_crypto.hash(utl_raw.cast_to_raw({s1}), 2)))"),

    // random()
    (N::Func, "NUMBER <- random()", "dbms_random.value"),

    // randrange()
    (N::Func, "INT <- randrange(INT, INT)", "floor(dbms_random.value({s1}, {s2}))"),

    // seq()
    (N::Func, "INT <- seq()", "vsqlimpl_pkg.seq()"),

    // rgb()
    (N::Func, concat!("COLOR <- rgb(", numberlike!(), ", ", numberlike!(), ", ", numberlike!(), ")"), "vsqlimpl_pkg.rgb({s1}, {s2}, {s3})"),
    (N::Func, concat!("COLOR <- rgb(", numberlike!(), ", ", numberlike!(), ", ", numberlike!(), ", ", numberlike!(), ")"), "vsqlimpl_pkg.rgb({s1}, {s2}, {s3}, {s4})"),

    // list()
    (N::Func, concat!("STRLIST <- list(", text!(), ")"), "vsqlimpl_pkg.list_{t1}({s1})"),
    (N::Func, concat!("T1 <- list(NULLLIST_", list!(), ")"), "{s1}"),
    (N::Func, "NULLLIST <- list(NULLSET)", "{s1}"),
    (N::Func, "INTLIST <- list(INTSET)", "{s1}"),
    (N::Func, "NUMBERLIST <- list(NUMBERSET)", "{s1}"),
    (N::Func, "STRLIST <- list(STRSET)", "{s1}"),
    (N::Func, "DATELIST <- list(DATESET)", "{s1}"),
    (N::Func, "DATETIMELIST <- list(DATETIMESET)", "{s1}"),

    // set()
    (N::Func, concat!("STRSET <- set(", text!(), ")"), "vsqlimpl_pkg.set_{t1}({s1})"),
    (N::Func, concat!("T1 <- set(", set!(), ")"), "{s1}"),
    (N::Func, "NULLSET <- set(NULLLIST)", "case when {s1} > 0 then 1 else {s1} end"),
    (N::Func, "INTSET <- set(INTLIST)", "vsqlimpl_pkg.set_{t1}({s1})"),
    (N::Func, "NUMBERSET <- set(NUMBERLIST)", "vsqlimpl_pkg.set_{t1}({s1})"),
    (N::Func, "STRSET <- set(STRLIST)", "vsqlimpl_pkg.set_{t1}({s1})"),
    (N::Func, "DATESET <- set(DATELIST)", "vsqlimpl_pkg.set_{t1}({s1})"),
    (N::Func, "DATETIMESET <- set(DATETIMELIST)", "vsqlimpl_pkg.set_{t1}({s1})"),

    // dist()
    (N::Func, "NUMBER <- dist(GEO, GEO)", "vsqlimpl_pkg.dist_geo_geo({s1}, {s2})"),

    // abs()
    (N::Func, "INT <- abs(BOOL)", "{s1}"),
    (N::Func, "INT <- abs(INT)", "abs({s1})"),
    (N::Func, "NUMBER <- abs(NUMBER)", "abs({s1})"),

    // cos()
    (N::Func, concat!("NUMBER <- cos(", numberlike!(), ")"), "cos({s1})"),

    // sin()
    (N::Func, concat!("NUMBER <- sin(", numberlike!(), ")"), "sin({s1})"),

    // tan()
    (N::Func, concat!("NUMBER <- tan(", numberlike!(), ")"), "tan({s1})"),

    // sqrt()
    (N::Func, concat!("NUMBER <- sqrt(", numberlike!(), ")"), "sqrt(case when {s1} >= 0 then {s1} else null end)"),

    // request_id()
    (N::Func, "STR <- request_id()", "livingapi_pkg.reqid"),

    // request_method()
    (N::Func, "STR <- request_method()", "livingapi_pkg.reqmethod"),

    // request_url()
    (N::Func, "STR <- request_url()", "livingapi_pkg.requrl"),

    // request_header_str()
    (N::Func, "STR <- request_header_str(STR)", "livingapi_pkg.reqheader_str({s1})"),

    // request_header_strlist()
    (N::Func, "STRLIST <- request_header_strlist(STR)", "livingapi_pkg.reqheader_str({s1})"),

    // request_cookie()
    (N::Func, "STR <- request_cookie(STR)", "livingapi_pkg.reqcookie_str({s1})"),

    // request_param_str()
    (N::Func, "STR <- request_param_str(STR)", "livingapi_pkg.reqparam_str({s1})"),

    // request_param_strlist()
    (N::Func, "STRLIST <- request_param_strlist(STR)", "livingapi_pkg.reqparam_strlist({s1})"),

    // request_param_int()
    (N::Func, "INT <- request_param_int(STR)", "livingapi_pkg.reqparam_int({s1})"),

    // request_param_intlist()
    (N::Func, "INTLIST <- request_param_intlist(STR)", "livingapi_pkg.reqparam_intlist({s1})"),

    // request_param_float()
    (N::Func, "NUMBER <- request_param_float(STR)", "livingapi_pkg.reqparam_float({s1})"),

    // request_param_floatlist()
    (N::Func, "NUMBERLIST <- request_param_floatlist(STR)", "livingapi_pkg.reqparam_floatlist({s1})"),

    // request_param_date()
    (N::Func, "DATE <- request_param_date(STR)", "livingapi_pkg.reqparam_date({s1})"),

    // request_param_datelist()
    (N::Func, "DATELIST <- request_param_datelist(STR)", "livingapi_pkg.reqparam_datelist({s1})"),

    // request_param_datetime()
    (N::Func, "DATETIME <- request_param_datetime(STR)", "livingapi_pkg.reqparam_datetime({s1})"),

    // request_param_datetimelist()
    (N::Func, "DATETIMELIST <- request_param_datetimelist(STR)", "livingapi_pkg.reqparam_datetimelist({s1})"),

    // search()
    (N::Func, "STR <- search()", "livingapi_pkg.global_search"),

    // lang()
    (N::Func, "STR <- lang()", "livingapi_pkg.global_lang"),

    // mode()
    (N::Func, "STR <- mode()", "livingapi_pkg.global_mode"),

    // .lower()
    (N::Meth, concat!("T1 <- ", text!(), ".lower()"), "lower({s1})"),

    // .upper()
    (N::Meth, concat!("T1 <- ", text!(), ".upper()"), "upper({s1})"),

    // .startswith()
    (N::Meth, concat!("BOOL <- ", text!(), ".startswith(STR_STRLIST)"), "vsqlimpl_pkg.startswith_{t1}_{t2}({s1}, {s2})"),

    // .endswith()
    (N::Meth, concat!("BOOL <- ", text!(), ".endswith(STR_STRLIST)"), "vsqlimpl_pkg.endswith_{t1}_{t2}({s1}, {s2})"),

    // .strip()
    (N::Meth, concat!("T1 <- ", text!(), ".strip()"), "vsqlimpl_pkg.strip_{t1}({s1}, null, 1, 1)"),
    (N::Meth, concat!("T1 <- ", text!(), ".strip(STR) "), "vsqlimpl_pkg.strip_{t1}({s1}, {s2}, 1, 1)"),

    // .lstrip()
    (N::Meth, concat!("T1 <- ", text!(), ".lstrip()"), "vsqlimpl_pkg.strip_{t1}({s1}, null, 1, 0)"),
    (N::Meth, concat!("T1 <- ", text!(), ".lstrip(STR) "), "vsqlimpl_pkg.strip_{t1}({s1}, {s2}, 1, 0)"),

    // .rstrip()
    (N::Meth, concat!("T1 <- ", text!(), ".rstrip()"), "vsqlimpl_pkg.strip_{t1}({s1}, null, 0, 1)"),
    (N::Meth, concat!("T1 <- ", text!(), ".rstrip(STR) "), "vsqlimpl_pkg.strip_{t1}({s1}, {s2}, 0, 1)"),

    // .find()
    (N::Meth, concat!("INT <- ", text!(), ".find(", text!(), ")"), "(instr({s1}, {s2}) - 1)"),
    (N::Meth, concat!("INT <- ", text!(), ".find(", text!(), ", NULL)"), "(instr({s1}, {s2}) - 1)"),
    (N::Meth, concat!("INT <- ", text!(), ".find(", text!(), ", NULL, NULL)"), "(instr({s1}, {s2}) - 1)"),
    (N::Meth, concat!("INT <- ", text!(), ".find(", text!(), ", NULL_INT)"), "vsqlimpl_pkg.find_{t1}_{t2}({s1}, {s2}, {s3}, null)"),
    (N::Meth, concat!("INT <- ", text!(), ".find(", text!(), ", NULL_INT, NULL_INT)"), "vsqlimpl_pkg.find_{t1}_{t2}({s1}, {s2}, {s3}, {s4})"),

    // .replace()
    (N::Meth, concat!("T1 <- ", text!(), ".replace(STR, STR)"), "replace({s1}, {s2}, {s3})"),

    // .split()
    (N::Meth, "STRLIST <- STR.split()", "vsqlimpl_pkg.split_{t1}_str({s1}, null)"),
    (N::Meth, "CLOBLIST <- CLOB.split()", "vsqlimpl_pkg.split_{t1}_str({s1}, null)"),
    (N::Meth, "STRLIST <- STR.split(NULL)", "vsqlimpl_pkg.split_{t1}_str(null, null)"),
    (N::Meth, "CLOBLIST <- CLOB.split(NULL)", "vsqlimpl_pkg.split_{t1}_str(null, null)"),
    (N::Meth, "STRLIST <- STR.split(STR)", "vsqlimpl_pkg.split_{t1}_str({s1}, {s2})"),
    (N::Meth, "CLOBLIST <- CLOB.split(STR)", "vsqlimpl_pkg.split_{t1}_str({s1}, {s2})"),
    (N::Meth, "STRLIST <- STR.split(STR, NULL)", "vsqlimpl_pkg.split_{t1}_str({s1}, {s2})"),
    (N::Meth, "CLOBLIST <- CLOB.split(STR, NULL)", "vsqlimpl_pkg.split_{t1}_str({s1}, {s2})"),
    (N::Meth, "STRLIST <- STR.split(NULL, BOOL_INT)", "vsqlimpl_pkg.split_{t1}_str({s1}, null, {s3})"),
    (N::Meth, "CLOBLIST <- CLOB.split(NULL, BOOL_INT)", "vsqlimpl_pkg.split_{t1}_str({s1}, null, {s3})"),
    (N::Meth, "STRLIST <- STR.split(STR, BOOL_INT)", "vsqlimpl_pkg.split_{t1}_str({s1}, {s2}, {s3})"),
    (N::Meth, "CLOBLIST <- CLOB.split(STR, BOOL_INT)", "vsqlimpl_pkg.split_{t1}_str({s1}, {s2}, {s3})"),

    // .join()
    (N::Meth, "STR <- STR.join(STR_STRLIST)", "vsqlimpl_pkg.join_str_{t2}({s1}, {s2})"),
    (N::Meth, "CLOB <- STR.join(CLOB_CLOBLIST)", "vsqlimpl_pkg.join_str_{t2}({s1}, {s2})"),

    // .lum()
    (N::Meth, "NUMBER <- COLOR.lum()", "vsqlimpl_pkg.lum({s1})"),

    // .week()
    (N::Meth, "INT <- DATE_DATETIME.week()", "to_number(to_char({s1}, 'IW'))"),

    // .year
    (N::Attr, "INT <- DATE_DATETIME.year", "extract(year from {s1})"),

    // .month
    (N::Attr, "INT <- DATE_DATETIME.month", "extract(month from {s1})"),

    // .day
    (N::Attr, "INT <- DATE_DATETIME.day", "extract(day from {s1})"),

    // .hour
    (N::Attr, "INT <- DATETIME.hour", "to_number(to_char({s1}, 'HH24'))"),

    // .minute
    (N::Attr, "INT <- DATETIME.minute", "to_number(to_char({s1}, 'MI'))"),

    // .second
    (N::Attr, "INT <- DATETIME.second", "to_number(to_char({s1}, 'SS'))"),

    // .weekday
    (N::Attr, "INT <- DATE_DATETIME.weekday", "vsqlimpl_pkg.attr_date_weekday({s1})"),

    // .yearday
    (N::Attr, "INT <- DATE_DATETIME.yearday", "to_number(to_char({s1}, 'DDD'))"),

    // .days
    (N::Attr, "INT <- DATEDELTA_DATETIMEDELTA.days", "trunc({s1})"),

    // .seconds
    (N::Attr, "INT <- DATETIMEDELTA.seconds", "trunc(mod({s1}, 1) * 86400 + 0.5)"),

    // .total_days
    (N::Attr, "NUMBER <- DATETIMEDELTA.total_days", "{s1}"),

    // .total_hours
    (N::Attr, "NUMBER <- DATETIMEDELTA.total_hours", "({s1} * 24)"),

    // .total_minutes
    (N::Attr, "NUMBER <- DATETIMEDELTA.total_minutes", "({s1} * 1440)"),

    // .total_seconds
    (N::Attr, "NUMBER <- DATETIMEDELTA.total_seconds", "({s1} * 86400)"),

    // .r
    (N::Attr, "INT <- COLOR.r", "vsqlimpl_pkg.attr_color_r({s1})"),

    // .g
    (N::Attr, "INT <- COLOR.g", "vsqlimpl_pkg.attr_color_g({s1})"),

    // .b
    (N::Attr, "INT <- COLOR.b", "vsqlimpl_pkg.attr_color_b({s1})"),

    // .a
    (N::Attr, "INT <- COLOR.a", "vsqlimpl_pkg.attr_color_a({s1})"),

    // .lat
    (N::Attr, "NUMBER <- GEO.lat", "vsqlimpl_pkg.attr_geo_lat({s1})"),

    // .long
    (N::Attr, "NUMBER <- GEO.long", "vsqlimpl_pkg.attr_geo_long({s1})"),

    // .info
    (N::Attr, "STR <- GEO.info", "vsqlimpl_pkg.attr_geo_info({s1})"),

    // CmpEq
    (N::CmpEq, "BOOL <- NULL == NULL", "1"),
    (N::CmpEq, concat!("BOOL <- ", any!(), " == NULL"), "(case when {s1} is null then 1 else 0 end)"),
    (N::CmpEq, concat!("BOOL <- NULL == ", any!()), "(case when {s2} is null then 1 else 0 end)"),
    (N::CmpEq, concat!("BOOL <- ", intlike!(), " == ", intlike!()), "vsqlimpl_pkg.eq_int_int({s1}, {s2})"),
    (N::CmpEq, concat!("BOOL <- ", numberlike!(), " == ", numberlike!()), "vsqlimpl_pkg.eq_{t1}_{t2}({s1}, {s2})"),
    (N::CmpEq, "BOOL <- GEO == GEO", "vsqlimpl_pkg.eq_str_str({s1}, {s2})"),
    (N::CmpEq, "BOOL <- COLOR == COLOR", "vsqlimpl_pkg.eq_int_int({s1}, {s2})"),
    (N::CmpEq, concat!("BOOL <- ", text!(), " == ", text!()), "vsqlimpl_pkg.eq_{t1}_{t2}({s1}, {s2})"),
    (N::CmpEq, "BOOL <- DATE_DATETIME == T1", "vsqlimpl_pkg.eq_{t1}_{t2}({s1}, {s2})"),
    (N::CmpEq, "BOOL <- DATEDELTA_MONTHDELTA_COLOR == T1", "vsqlimpl_pkg.eq_int_int({s1}, {s2})"),
    (N::CmpEq, "BOOL <- DATETIMEDELTA == DATETIMEDELTA", "vsqlimpl_pkg.eq_datetimedelta_datetimedelta({s1}, {s2})"),
    (N::CmpEq, concat!("BOOL <- NULLLIST == NULLLIST_", list!()), "vsqlimpl_pkg.eq_{t1}_{t2}({s1}, {s2})"),
    (N::CmpEq, concat!("BOOL <- NULLLIST_", list!(), " == NULLLIST"), "vsqlimpl_pkg.eq_{t1}_{t2}({s1}, {s2})"),
    (N::CmpEq, "BOOL <- INTLIST_NUMBERLIST == INTLIST_NUMBERLIST", "vsqlimpl_pkg.eq_{t1}_{t2}({s1}, {s2})"),
    (N::CmpEq, "BOOL <- STRLIST_CLOBLIST == STRLIST_CLOBLIST", "vsqlimpl_pkg.eq_{t1}_{t2}({s1}, {s2})"),
    (N::CmpEq, "BOOL <- DATELIST_DATETIMELIST == DATELIST_DATETIMELIST", "vsqlimpl_pkg.eq_{t1}_{t2}({s1}, {s2})"),
    (N::CmpEq, "BOOL <- NULLSET == NULLSET", "vsqlimpl_pkg.eq_nullset_nullset({s1}, {s2})"),
    (N::CmpEq, "BOOL <- NULLSET == INTSET", "vsqlimpl_pkg.eq_nullset_intset({s1}, {s2})"),
    (N::CmpEq, "BOOL <- NULLSET == NUMBERSET", "vsqlimpl_pkg.eq_nullset_numberset({s1}, {s2})"),
    (N::CmpEq, "BOOL <- NULLSET == STRSET", "vsqlimpl_pkg.eq_nullset_strset({s1}, {s2})"),
    (N::CmpEq, "BOOL <- NULLSET == DATESET", "vsqlimpl_pkg.eq_nullset_datetimeset({s1}, {s2})"),
    (N::CmpEq, "BOOL <- NULLSET == DATETIMESET", "vsqlimpl_pkg.eq_nullset_datetimeset({s1}, {s2})"),
    (N::CmpEq, "BOOL <- INTSET == NULLSET", "vsqlimpl_pkg.eq_intset_nullset({s1}, {s2})"),
    (N::CmpEq, "BOOL <- NUMBERSET == NULLSET", "vsqlimpl_pkg.eq_numberset_nullset({s1}, {s2})"),
    (N::CmpEq, "BOOL <- STRSET == NULLSET", "vsqlimpl_pkg.eq_strset_nullset({s1}, {s2})"),
    (N::CmpEq, "BOOL <- DATESET == NULLSET", "vsqlimpl_pkg.eq_datetimeset_nullset({s1}, {s2})"),
    (N::CmpEq, "BOOL <- DATETIMESET == NULLSET", "vsqlimpl_pkg.eq_datetimeset_nullset({s1}, {s2})"),
    (N::CmpEq, "BOOL <- INTSET == INTSET", "vsqlimpl_pkg.eq_intset_intset({s1}, {s2})"),
    (N::CmpEq, "BOOL <- NUMBERSET == NUMBERSET", "vsqlimpl_pkg.eq_numberset_numberset({s1}, {s2})"),
    (N::CmpEq, "BOOL <- STRSET == STRSET", "vsqlimpl_pkg.eq_strset_strset({s1}, {s2})"),
    (N::CmpEq, "BOOL <- DATESET_DATETIMESET == DATESET_DATETIMESET", "vsqlimpl_pkg.eq_datetimeset_datetimeset({s1}, {s2})"),
    (N::CmpEq, concat!("BOOL <- ", any!(), " == ", any!()), "(case when {s1} is null and {s2} is null then 1 else 0 end)"),

    // CmpNe
    (N::CmpNe, "BOOL <- NULL != NULL", "0"),
    (N::CmpNe, concat!("BOOL <- ", any!(), " != NULL"), "(case when {s1} is null then 0 else 1 end)"),
    (N::CmpNe, concat!("BOOL <- NULL != ", any!()), "(case when {s2} is null then 0 else 1 end)"),
    (N::CmpNe, concat!("BOOL <- ", intlike!(), " != ", intlike!()), "(1 - vsqlimpl_pkg.eq_int_int({s1}, {s2}))"),
    (N::CmpNe, concat!("BOOL <- ", numberlike!(), " != ", numberlike!()), "(1 - vsqlimpl_pkg.eq_{t1}_{t2}({s1}, {s2}))"),
    (N::CmpNe, "BOOL <- GEO != GEO", "(1 - vsqlimpl_pkg.eq_str_str({s1}, {s2}))"),
    (N::CmpNe, "BOOL <- COLOR != COLOR", "(1 - vsqlimpl_pkg.eq_int_int({s1}, {s2}))"),
    (N::CmpNe, concat!("BOOL <- ", text!(), " != ", text!()), "(1 - vsqlimpl_pkg.eq_{t1}_{t2}({s1}, {s2}))"),
    (N::CmpNe, "BOOL <- DATE_DATETIME != T1", "(1 - vsqlimpl_pkg.eq_{t1}_{t2}({s1}, {s2}))"),
    (N::CmpNe, "BOOL <- DATEDELTA_MONTHDELTA_COLOR != T1", "(1 - vsqlimpl_pkg.eq_int_int({s1}, {s2}))"),
    (N::CmpNe, "BOOL <- DATETIMEDELTA != DATETIMEDELTA", "(1 - vsqlimpl_pkg.eq_datetimedelta_datetimedelta({s1}, {s2}))"),
    (N::CmpNe, concat!("BOOL <- NULLLIST != NULLLIST_", list!()), "(1 - vsqlimpl_pkg.eq_{t1}_{t2}({s1}, {s2}))"),
    (N::CmpNe, concat!("BOOL <- NULLLIST_", list!(), " != NULLLIST"), "(1 - vsqlimpl_pkg.eq_{t1}_{t2}({s1}, {s2}))"),
    (N::CmpNe, "BOOL <- INTLIST_NUMBERLIST != INTLIST_NUMBERLIST", "(1 - vsqlimpl_pkg.eq_{t1}_{t2}({s1}, {s2}))"),
    (N::CmpNe, "BOOL <- STRLIST_CLOBLIST != STRLIST_CLOBLIST", "(1 - vsqlimpl_pkg.eq_{t1}_{t2}({s1}, {s2}))"),
    (N::CmpNe, "BOOL <- DATELIST_DATETIMELIST != DATELIST_DATETIMELIST", "(1 - vsqlimpl_pkg.eq_{t1}_{t2}({s1}, {s2}))"),
    (N::CmpNe, "BOOL <- NULLSET != NULLSET", "(1 - vsqlimpl_pkg.eq_nullset_nullset({s1}, {s2}))"),
    (N::CmpNe, "BOOL <- NULLSET != INTSET", "(1 - vsqlimpl_pkg.eq_nullset_intset({s1}, {s2}))"),
    (N::CmpNe, "BOOL <- NULLSET != NUMBERSET", "(1 - vsqlimpl_pkg.eq_nullset_numberset({s1}, {s2}))"),
    (N::CmpNe, "BOOL <- NULLSET != STRSET", "(1 - vsqlimpl_pkg.eq_nullset_strset({s1}, {s2}))"),
    (N::CmpNe, "BOOL <- NULLSET != DATESET", "(1 - vsqlimpl_pkg.eq_nullset_datetimeset({s1}, {s2}))"),
    (N::CmpNe, "BOOL <- NULLSET != DATETIMESET", "(1 - vsqlimpl_pkg.eq_nullset_datetimeset({s1}, {s2}))"),
    (N::CmpNe, "BOOL <- INTSET != NULLSET", "(1 - vsqlimpl_pkg.eq_intset_nullset({s1}, {s2}))"),
    (N::CmpNe, "BOOL <- NUMBERSET != NULLSET", "(1 - vsqlimpl_pkg.eq_numberset_nullset({s1}, {s2}))"),
    (N::CmpNe, "BOOL <- STRSET != NULLSET", "(1 - vsqlimpl_pkg.eq_strset_nullset({s1}, {s2}))"),
    (N::CmpNe, "BOOL <- DATESET != NULLSET", "(1 - vsqlimpl_pkg.eq_datetimeset_nullset({s1}, {s2}))"),
    (N::CmpNe, "BOOL <- DATETIMESET != NULLSET", "(1 - vsqlimpl_pkg.eq_datetimeset_nullset({s1}, {s2}))"),
    (N::CmpNe, "BOOL <- INTSET != INTSET", "(1 - vsqlimpl_pkg.eq_intset_intset({s1}, {s2}))"),
    (N::CmpNe, "BOOL <- NUMBERSET != NUMBERSET", "(1 - vsqlimpl_pkg.eq_numberset_numberset({s1}, {s2}))"),
    (N::CmpNe, "BOOL <- STRSET != STRSET", "(1 - vsqlimpl_pkg.eq_strset_strset({s1}, {s2}))"),
    (N::CmpNe, "BOOL <- DATESET_DATETIMESET != DATESET_DATETIMESET", "(1 - vsqlimpl_pkg.eq_datetimeset_datetimeset({s1}, {s2}))"),
    (N::CmpNe, concat!("BOOL <- ", any!(), " != ", any!()), "(case when {s1} is null and {s2} is null then 0 else 1 end)"),

    // CmpGt
    (N::CmpGt, "BOOL <- NULL > NULL", "0"),
    (N::CmpGt, concat!("BOOL <- ", any!(), " > NULL"), "(case when {s1} is null then 0 else null end)"),
    (N::CmpGt, concat!("BOOL <- NULL > ", any!()), "(case when {s2} is null then 0 else null end)"),
    (N::CmpGt, concat!("BOOL <- ", intlike!(), " > ", intlike!()), "decode(vsqlimpl_pkg.cmp_int_int({s1}, {s2}), 1, 1, null, null, 0)"),
    (N::CmpGt, concat!("BOOL <- ", numberlike!(), " > ", numberlike!()), "decode(vsqlimpl_pkg.cmp_{t1}_{t2}({s1}, {s2}), 1, 1, null, null, 0)"),
    (N::CmpGt, concat!("BOOL <- ", text!(), " > ", text!()), "decode(vsqlimpl_pkg.cmp_{t1}_{t2}({s1}, {s2}), 1, 1, null, null, 0)"),
    (N::CmpGt, "BOOL <- DATE_DATETIME > T1", "decode(vsqlimpl_pkg.cmp_{t1}_{t2}({s1}, {s2}), 1, 1, null, null, 0)"),
    (N::CmpGt, "BOOL <- DATEDELTA > DATEDELTA", "decode(vsqlimpl_pkg.cmp_int_int({s1}, {s2}), 1, 1, null, null, 0)"),
    (N::CmpGt, "BOOL <- DATETIMEDELTA > DATETIMEDELTA", "decode(vsqlimpl_pkg.cmp_number_number({s1}, {s2}), 1, 1, null, null, 0)"),
    (N::CmpGt, "BOOL <- INTLIST_NUMBERLIST > INTLIST_NUMBERLIST", "decode(vsqlimpl_pkg.cmp_{t1}_{t2}({s1}, {s2}), 1, 1, null, null, 0)"),
    (N::CmpGt, "BOOL <- STRLIST_CLOBLIST > STRLIST_CLOBLIST", "decode(vsqlimpl_pkg.cmp_{t1}_{t2}({s1}, {s2}), 1, 1, null, null, 0)"),
    (N::CmpGt, "BOOL <- DATELIST_DATETIMELIST > T1", "decode(vsqlimpl_pkg.cmp_{t1}_{t2}({s1}, {s2}), 1, 1, null, null, 0)"),
    (N::CmpGt, concat!("BOOL <- NULLLIST > NULLLIST_", list!()), "decode(vsqlimpl_pkg.cmp_{t1}_{t2}({s1}, {s2}), 1, 1, null, null, 0)"),
    (N::CmpGt, concat!("BOOL <- NULLLIST_", list!(), " > NULLLIST"), "decode(vsqlimpl_pkg.cmp_{t1}_{t2}({s1}, {s2}), 1, 1, null, null, 0)"),

    // CmpGe
    (N::CmpGe, "BOOL <- NULL >= NULL", "1"),
    (N::CmpGe, concat!("BOOL <- ", any!(), " >= NULL"), "(case when {s1} is null then 1 else null end)"),
    (N::CmpGe, concat!("BOOL <- NULL >= ", any!()), "(case when {s2} is null then 1 else null end)"),
    (N::CmpGe, concat!("BOOL <- ", intlike!(), " >= ", intlike!()), "decode(vsqlimpl_pkg.cmp_int_int({s1}, {s2}), -1, 0, null, null, 1)"),
    (N::CmpGe, concat!("BOOL <- ", numberlike!(), " >= ", numberlike!()), "decode(vsqlimpl_pkg.cmp_{t1}_{t2}({s1}, {s2}), -1, 0, null, null, 1)"),
    (N::CmpGe, concat!("BOOL <- ", text!(), " >= ", text!()), "decode(vsqlimpl_pkg.cmp_{t1}_{t2}({s1}, {s2}), -1, 0, null, null, 1)"),
    (N::CmpGe, "BOOL <- DATE_DATETIME >= T1", "decode(vsqlimpl_pkg.cmp_{t1}_{t2}({s1}, {s2}), -1, 0, null, null, 1)"),
    (N::CmpGe, "BOOL <- DATEDELTA >= DATEDELTA", "decode(vsqlimpl_pkg.cmp_int_int({s1}, {s2}), -1, 0, null, null, 1)"),
    (N::CmpGe, "BOOL <- DATETIMEDELTA >= DATETIMEDELTA", "decode(vsqlimpl_pkg.cmp_number_number({s1}, {s2}), -1, 0, null, null, 1)"),
    (N::CmpGe, "BOOL <- INTLIST_NUMBERLIST >= INTLIST_NUMBERLIST", "decode(vsqlimpl_pkg.cmp_{t1}_{t2}({s1}, {s2}), -1, 0, null, null, 1)"),
    (N::CmpGe, "BOOL <- STRLIST_CLOBLIST >= STRLIST_CLOBLIST", "decode(vsqlimpl_pkg.cmp_{t1}_{t2}({s1}, {s2}), -1, 0, null, null, 1)"),
    (N::CmpGe, "BOOL <- DATELIST_DATETIMELIST >= T1", "decode(vsqlimpl_pkg.cmp_{t1}_{t2}({s1}, {s2}), -1, 0, null, null, 1)"),
    (N::CmpGe, concat!("BOOL <- NULLLIST >= NULLLIST_", list!()), "decode(vsqlimpl_pkg.cmp_{t1}_{t2}({s1}, {s2}), -1, 0, null, null, 1)"),
    (N::CmpGe, concat!("BOOL <- NULLLIST_", list!(), " >= NULLLIST"), "decode(vsqlimpl_pkg.cmp_{t1}_{t2}({s1}, {s2}), -1, 0, null, null, 1)"),

    // CmpLt
    (N::CmpLt, "BOOL <- NULL < NULL", "0"),
    (N::CmpLt, concat!("BOOL <- ", any!(), " < NULL"), "(case when {s1} is null then 0 else null end)"),
    (N::CmpLt, concat!("BOOL <- NULL < ", any!()), "(case when {s2} is null then 0 else null end)"),
    (N::CmpLt, concat!("BOOL <- ", intlike!(), " < ", intlike!()), "decode(vsqlimpl_pkg.cmp_int_int({s1}, {s2}), -1, 1, null, null, 0)"),
    (N::CmpLt, concat!("BOOL <- ", numberlike!(), " < ", numberlike!()), "decode(vsqlimpl_pkg.cmp_{t1}_{t2}({s1}, {s2}), -1, 1, null, null, 0)"),
    (N::CmpLt, concat!("BOOL <- ", text!(), " < ", text!()), "decode(vsqlimpl_pkg.cmp_{t1}_{t2}({s1}, {s2}), -1, 1, null, null, 0)"),
    (N::CmpLt, "BOOL <- DATE_DATETIME < T1", "decode(vsqlimpl_pkg.cmp_{t1}_{t2}({s1}, {s2}), -1, 1, null, null, 0)"),
    (N::CmpLt, "BOOL <- DATEDELTA < DATEDELTA", "decode(vsqlimpl_pkg.cmp_int_int({s1}, {s2}), -1, 1, null, null, 0)"),
    (N::CmpLt, "BOOL <- DATETIMEDELTA < DATETIMEDELTA", "decode(vsqlimpl_pkg.cmp_number_number({s1}, {s2}), -1, 1, null, null, 0)"),
    (N::CmpLt, "BOOL <- INTLIST_NUMBERLIST < INTLIST_NUMBERLIST", "decode(vsqlimpl_pkg.cmp_{t1}_{t2}({s1}, {s2}), -1, 1, null, null, 0)"),
    (N::CmpLt, "BOOL <- STRLIST_CLOBLIST < STRLIST_CLOBLIST", "decode(vsqlimpl_pkg.cmp_{t1}_{t2}({s1}, {s2}), -1, 1, null, null, 0)"),
    (N::CmpLt, "BOOL <- DATELIST_DATETIMELIST < T1", "decode(vsqlimpl_pkg.cmp_{t1}_{t2}({s1}, {s2}), -1, 1, null, null, 0)"),
    (N::CmpLt, concat!("BOOL <- NULLLIST < NULLLIST_", list!()), "decode(vsqlimpl_pkg.cmp_{t1}_{t2}({s1}, {s2}), -1, 1, null, null, 0)"),
    (N::CmpLt, concat!("BOOL <- NULLLIST_", list!(), " < NULLLIST"), "decode(vsqlimpl_pkg.cmp_{t1}_{t2}({s1}, {s2}), -1, 1, null, null, 0)"),

    // CmpLe
    (N::CmpLe, "BOOL <- NULL <= NULL", "1"),
    (N::CmpLe, concat!("BOOL <- ", any!(), " <= NULL"), "(case when {s1} is null then 1 else null end)"),
    (N::CmpLe, concat!("BOOL <- NULL <= ", any!()), "(case when {s2} is null then 1 else null end)"),
    (N::CmpLe, concat!("BOOL <- ", intlike!(), " <= ", intlike!()), "decode(vsqlimpl_pkg.cmp_int_int({s1}, {s2}), 1, 0, null, null, 1)"),
    (N::CmpLe, concat!("BOOL <- ", numberlike!(), " <= ", numberlike!()), "decode(vsqlimpl_pkg.cmp_{t1}_{t2}({s1}, {s2}), 1, 0, null, null, 1)"),
    (N::CmpLe, concat!("BOOL <- ", text!(), " <= ", text!()), "decode(vsqlimpl_pkg.cmp_{t1}_{t2}({s1}, {s2}), 1, 0, null, null, 1)"),
    (N::CmpLe, "BOOL <- DATE_DATETIME <= T1", "decode(vsqlimpl_pkg.cmp_{t1}_{t2}({s1}, {s2}), 1, 0, null, null, 1)"),
    (N::CmpLe, "BOOL <- DATEDELTA <= DATEDELTA", "decode(vsqlimpl_pkg.cmp_int_int({s1}, {s2}), 1, 0, null, null, 1)"),
    (N::CmpLe, "BOOL <- DATETIMEDELTA <= DATETIMEDELTA", "decode(vsqlimpl_pkg.cmp_number_number({s1}, {s2}), 1, 0, null, null, 1)"),
    (N::CmpLe, "BOOL <- INTLIST_NUMBERLIST <= INTLIST_NUMBERLIST", "decode(vsqlimpl_pkg.cmp_{t1}_{t2}({s1}, {s2}), 1, 0, null, null, 1)"),
    (N::CmpLe, "BOOL <- STRLIST_CLOBLIST <= STRLIST_CLOBLIST", "decode(vsqlimpl_pkg.cmp_{t1}_{t2}({s1}, {s2}), 1, 0, null, null, 1)"),
    (N::CmpLe, "BOOL <- DATELIST_DATETIMELIST <= T1", "decode(vsqlimpl_pkg.cmp_{t1}_{t2}({s1}, {s2}), 1, 0, null, null, 1)"),
    (N::CmpLe, concat!("BOOL <- NULLLIST <= NULLLIST_", list!()), "decode(vsqlimpl_pkg.cmp_{t1}_{t2}({s1}, {s2}), 1, 0, null, null, 1)"),
    (N::CmpLe, concat!("BOOL <- NULLLIST_", list!(), " <= NULLLIST"), "decode(vsqlimpl_pkg.cmp_{t1}_{t2}({s1}, {s2}), 1, 0, null, null, 1)"),

    // Add
    (N::Add, concat!("INT <- ", intlike!(), " + ", intlike!()), "({s1} + {s2})"),
    (N::Add, concat!("NUMBER <- ", numberlike!(), " + ", numberlike!()), "({s1} + {s2})"),
    (N::Add, "STR <- STR + STR", "({s1} || {s2})"),
    (N::Add, concat!("CLOB <- ", text!(), " + ", text!()), "({s1} || {s2})"),
    (N::Add, "INTLIST <- INTLIST + INTLIST", "vsqlimpl_pkg.add_intlist_intlist({s1}, {s2})"),
    (N::Add, "NUMBERLIST <- INTLIST_NUMBERLIST + INTLIST_NUMBERLIST", "vsqlimpl_pkg.add_{t1}_{t2}({s1}, {s2})"),
    (N::Add, "STRLIST <- STRLIST + STRLIST", "vsqlimpl_pkg.add_strlist_strlist({s1}, {s2})"),
    (N::Add, "CLOBLIST <- STRLIST_CLOBLIST + STRLIST_CLOBLIST", "vsqlimpl_pkg.add_{t1}_{t2}({s1}, {s2})"),
    (N::Add, "T1 <- DATELIST_DATETIMELIST + T1", "vsqlimpl_pkg.add_{t1}_{t2}({s1}, {s2})"),
    (N::Add, "NULLLIST <- NULLLIST + NULLLIST", "({s1} + {s2})"),
    (N::Add, concat!("T2 <- NULLLIST + NULLLIST_", list!()), "vsqlimpl_pkg.add_{t1}_{t2}({s1}, {s2})"),
    (N::Add, concat!("T1 <- NULLLIST_", list!(), " + NULLLIST"), "vsqlimpl_pkg.add_{t1}_{t2}({s1}, {s2})"),
    (N::Add, "DATE <- DATE + DATEDELTA", "({s1} + {s2})"),
    (N::Add, "DATETIME <- DATETIME + DATEDELTA_DATETIMEDELTA", "({s1} + {s2})"),
    (N::Add, "T1 <- DATE_DATETIME + MONTHDELTA", "vsqlimpl_pkg.add_{t1}_months({s1}, {s2})"),
    (N::Add, "T2 <- MONTHDELTA + DATE_DATETIME", "vsqlimpl_pkg.add_months_{t2}({s1}, {s2})"),
    (N::Add, "DATEDELTA <- DATEDELTA + DATEDELTA", "({s1} + {s2})"),
    (N::Add, "DATETIMEDELTA <- DATEDELTA_DATETIMEDELTA + DATEDELTA_DATETIMEDELTA", "({s1} + {s2})"),
    (N::Add, "MONTHDELTA <- MONTHDELTA + MONTHDELTA", "({s1} + {s2})"),

    // Sub
    (N::Sub, concat!("INT <- ", intlike!(), " - ", intlike!()), "({s1} - {s2})"),
    (N::Sub, concat!("NUMBER <- ", numberlike!(), " - ", numberlike!()), "({s1} - {s2})"),
    (N::Sub, "DATE <- DATE - DATEDELTA", "({s1} - {s2})"),
    (N::Sub, "DATEDELTA <- DATE - DATE", "({s1} - {s2})"),
    (N::Sub, "DATETIMEDELTA <- DATETIME - DATETIME", "({s1} - {s2})"),
    (N::Sub, "T1 <- DATE_DATETIME - MONTHDELTA", "vsqlimpl_pkg.add_{t1}_months({s1}, -{s2})"),
    (N::Sub, "DATETIME <- DATETIME - DATEDELTA_DATETIMEDELTA", "({s1} - {s2})"),
    (N::Sub, "T1 <- DATEDELTA_MONTHDELTA - T1", "({s1} - {s2})"),
    (N::Sub, "DATETIMEDELTA <- DATEDELTA_DATETIMEDELTA - DATEDELTA_DATETIMEDELTA", "({s1} - {s2})"),

    // Mul
    (N::Mul, concat!("INT <- ", intlike!(), " * ", intlike!()), "({s1} * {s2})"),
    (N::Mul, concat!("NUMBER <- ", numberlike!(), " * ", numberlike!()), "({s1} * {s2})"),
    (N::Mul, concat!("T2 <- ", intlike!(), " * DATEDELTA_DATETIMEDELTA_MONTHDELTA"), "({s1} * {s2})"),
    (N::Mul, "DATETIMEDELTA <- NUMBER * DATETIMEDELTA", "({s1} * {s2})"),
    (N::Mul, concat!("T2 <- ", intlike!(), " * ", text!()), "vsqlimpl_pkg.mul_int_{t2}({s1}, {s2})"),
    (N::Mul, concat!("T1 <- ", text!(), " * ", intlike!()), "vsqlimpl_pkg.mul_{t1}_int({s1}, {s2})"),
    (N::Mul, concat!("T2 <- ", intlike!(), " * ", list!()), "vsqlimpl_pkg.mul_int_{t2}({s1}, {s2})"),
    (N::Mul, concat!("T1 <- ", list!(), " * ", intlike!()), "vsqlimpl_pkg.mul_{t1}_int({s1}, {s2})"),
    (N::Mul, concat!("NULLLIST <- ", intlike!(), " * NULLLIST"), "({s1} * {s2})"),
    (N::Mul, concat!("NULLLIST <- NULLLIST * ", intlike!()), "({s1} * {s2})"),

    // TrueDiv
    (N::TrueDiv, "INT <- BOOL / BOOL", "({s1} / {s2})"),
    (N::TrueDiv, concat!("NUMBER <- ", numberlike!(), " / ", numberlike!()), "({s1} / {s2})"),
    (N::TrueDiv, concat!("DATETIMEDELTA <- DATETIMEDELTA / ", numberlike!()), "({s1} / {s2})"),

    // FloorDiv
    (N::FloorDiv, concat!("INT <- ", numberlike!(), " // ", numberlike!()), "vsqlimpl_pkg.floordiv_{t1}_{t2}({s1}, {s2})"),
    (N::FloorDiv, concat!("T1 <- DATEDELTA_MONTHDELTA // ", intlike!()), "vsqlimpl_pkg.floordiv_int_int({s1}, {s2})"),
    (N::FloorDiv, concat!("DATEDELTA <- DATETIMEDELTA // ", numberlike!()), "vsqlimpl_pkg.floordiv_number_int({s1}, {s2})"),

    // Mod
    (N::Mod, concat!("INT <- ", intlike!(), " % ", intlike!()), "vsqlimpl_pkg.mod_int_int({s1}, {s2})"),
    (N::Mod, concat!("NUMBER <- ", numberlike!(), " % ", numberlike!()), "vsqlimpl_pkg.mod_{t1}_{t2}({s1}, {s2})"),
    (N::Mod, "COLOR <- COLOR % COLOR", "vsqlimpl_pkg.mod_color_color({s1}, {s2})"),

    // ShiftLeft
    (N::ShiftLeft, concat!("INT <- ", intlike!(), " << ", intlike!()), "trunc({s1} * power(2, {s2}))"),

    // ShiftRight
    (N::ShiftRight, concat!("INT <- ", intlike!(), " >> ", intlike!()), "trunc({s1} / power(2, {s2}))"),

    // And
    (N::And, concat!("T1 <- ", any!(), " ? NULL"), "null"),
    (N::And, concat!("T2 <- NULL ? ", any!()), "null"),
    (N::And, "BOOL <- BOOL ? BOOL", "(case when {s1} = 1 then {s2} else 0 end)"),
    (N::And, concat!("INT <- ", intlike!(), " ? ", intlike!()), "(case when nvl({s1}, 0) != 0 then {s2} else {s1} end)"),
    (N::And, concat!("NUMBER <- ", numberlike!(), " ? ", numberlike!()), "(case when nvl({s1}, 0) != 0 then {s2} else {s1} end)"),
    (N::And, "STR <- STR ? STR", "nvl2({s1}, {s2}, {s1})"),
    (N::And, "CLOB <- STR ? CLOB", "(case when {s1} is not null then {s2} else to_clob({s1}) end)"),
    (N::And, "CLOB <- CLOB ? CLOB", "(case when {s1} is not null and length({s1}) != 0 then {s2} else {s1} end)"),
    (N::And, "CLOB <- CLOB ? STR", "(case when {s1} is not null and length({s1}) != 0 then to_clob({s2}) else {s1} end)"),
    (N::And, "T1 <- DATE_DATETIME ? T1", "nvl2({s1}, {s2}, {s1})"),
    (N::And, "T1 <- DATEDELTA_DATETIMEDELTA_MONTHDELTA ? T1", "(case when nvl({s1}, 0) != 0 then {s2} else {s1} end)"),
    (N::And, concat!("T1 <- ", list!(), " ? T1"), "(case when nvl(vsqlimpl_pkg.len_{t1}({s1}), 0) != 0 then {s2} else {s1} end)"),
    (N::And, "DATETIMELIST <- DATELIST_DATETIMELIST ? DATELIST_DATETIMELIST", "(case when nvl(vsqlimpl_pkg.len_{t1}({s1}), 0) != 0 then {s2} else {s1} end)"),
    (N::And, "NULLLIST <- NULLLIST ? NULLLIST", "(case when nvl({s1}, 0) != 0 then {s2} else {s1} end)"),
    (N::And, concat!("T2 <- NULLLIST ? ", list!()), "(case when nvl({s1}, 0) != 0 then {s2} else vsqlimpl_pkg.{t2}_fromlen({s1}) end)"),
    (N::And, concat!("T1 <- ", list!(), " ? NULLLIST"), "(case when nvl(vsqlimpl_pkg.len_{t1}({s1}), 0) != 0 then vsqlimpl_pkg.{t1}_fromlen({s2}) else {s1} end)"),

    // Or
    (N::Or, concat!("T1 <- ", any!(), " ? NULL"), "{s1}"),
    (N::Or, concat!("T2 <- NULL ? ", any!()), "{s2}"),
    (N::Or, "BOOL <- BOOL ? BOOL", "(case when {s1} = 1 then 1 else {s2} end)"),
    (N::Or, concat!("INT <- ", intlike!(), " ? ", intlike!()), "(case when nvl({s1}, 0) != 0 then {s1} else {s2} end)"),
    (N::Or, concat!("NUMBER <- ", numberlike!(), " ? ", numberlike!()), "(case when nvl({s1}, 0) != 0 then {s1} else {s2} end)"),
    (N::Or, "STR <- STR ? STR", "nvl({s1}, {s2})"),
    (N::Or, "CLOB <- STR ? CLOB", "(case when {s1} is not null then to_clob({s1}) else {s2} end)"),
    (N::Or, "CLOB <- CLOB ? CLOB", "(case when {s1} is not null and length({s1}) != 0 then {s1} else {s2} end)"),
    (N::Or, "CLOB <- CLOB ? STR", "(case when {s1} is not null and length({s1}) != 0 then {s1} else to_clob({s2}) end)"),
    (N::Or, "T1 <- DATE_DATETIME ? T1", "nvl({s1}, {s2})"),
    (N::Or, "T1 <- DATEDELTA_DATETIMEDELTA_MONTHDELTA ? T1", "(case when nvl({s1}, 0) != 0 then {s1} else {s2} end)"),
    (N::Or, concat!("T1 <- ", list!(), " ? T1"), "(case when nvl(vsqlimpl_pkg.len_{t1}({s1}), 0) != 0 then {s1} else {s2} end)"),
    (N::Or, "DATETIMELIST <- DATELIST_DATETIMELIST ? DATELIST_DATETIMELIST", "(case when nvl(vsqlimpl_pkg.len_{t1}({s1}), 0) != 0 then {s1} else {s2} end)"),
    (N::Or, "NULLLIST <- NULLLIST ? NULLLIST", "(case when nvl({s1}, 0) != 0 then {s1} else {s2} end)"),
    (N::Or, concat!("T2 <- NULLLIST ? ", list!()), "(case when nvl({s1}, 0) != 0 then vsqlimpl_pkg.{t2}_fromlen({s1}) else {s2} end)"),
    (N::Or, concat!("T1 <- ", list!(), " ? NULLLIST"), "(case when nvl(vsqlimpl_pkg.len_{t1}({s1}), 0) != 0 then {s1} else vsqlimpl_pkg.{t1}_fromlen({s2}) end)"),

    // Contains
    (N::Contains, concat!("BOOL <- NULL ? ", list!(), "_NULLLIST"), "vsqlimpl_pkg.contains_null_{t2}({s2})"),
    (N::Contains, "BOOL <- STR_CLOB ? STR_CLOB_STRLIST_CLOBLIST_STRSET", "vsqlimpl_pkg.contains_{t1}_{t2}({s1}, {s2})"),
    (N::Contains, "BOOL <- INT_NUMBER ? INTLIST_NUMBERLIST_INTSET_NUMBERSET", "vsqlimpl_pkg.contains_{t1}_{t2}({s1}, {s2})"),
    (N::Contains, "BOOL <- DATE ? DATELIST_DATESET", "vsqlimpl_pkg.contains_{t1}_{t2}({s1}, {s2})"),
    (N::Contains, "BOOL <- DATETIME ? DATETIMELIST_DATETIMESET", "vsqlimpl_pkg.contains_{t1}_{t2}({s1}, {s2})"),
    (N::Contains, concat!("BOOL <- ", any!(), " ? NULLLIST"), "case when {s1} is null then vsqlimpl_pkg.contains_null_nulllist({s2}) else 0 end"),

    // NotContains
    (N::NotContains, concat!("BOOL <- NULL ? ", list!(), "_NULLLIST"), "(1 - vsqlimpl_pkg.contains_null_{t2}({s2}))"),
    (N::NotContains, "BOOL <- STR_CLOB ? STR_CLOB_STRLIST_CLOBLIST_STRSET", "(1 - vsqlimpl_pkg.contains_{t1}_{t2}({s1}, {s2}))"),
    (N::NotContains, "BOOL <- INT_NUMBER ? INTLIST_NUMBERLIST_INTSET_NUMBERSET", "(1 - vsqlimpl_pkg.contains_{t1}_{t2}({s1}, {s2}))"),
    (N::NotContains, "BOOL <- DATE ? DATELIST_DATESET", "(1 - vsqlimpl_pkg.contains_{t1}_{t2}({s1}, {s2}))"),
    (N::NotContains, "BOOL <- DATETIME ? DATETIMELIST_DATETIMESET", "(1 - vsqlimpl_pkg.contains_{t1}_{t2}({s1}, {s2}))"),
    (N::NotContains, concat!("BOOL <- ", any!(), " ? NULLLIST"), "case when {s1} is null then 1 - vsqlimpl_pkg.contains_null_nulllist({s2}) else 1 end"),

    // Is
    (N::Is, "BOOL <- NULL ? NULL", "1"),
    (N::Is, concat!("BOOL <- ", any!(), " ? NULL"), "(case when {s1} is null then 1 else 0 end)"),
    (N::Is, concat!("BOOL <- NULL ? ", any!()), "(case when {s2} is null then 1 else 0 end)"),

    // IsNot
    (N::IsNot, "BOOL <- NULL ? NULL", "0"),
    (N::IsNot, concat!("BOOL <- ", any!(), " ? NULL"), "(case when {s1} is not null then 1 else 0 end)"),
    (N::IsNot, concat!("BOOL <- NULL ? ", any!()), "(case when {s2} is not null then 1 else 0 end)"),

    // Item
    (N::Item, concat!("NULL <- NULLLIST[", intlike!(), "]"), "null"),
    (N::Item, concat!("STR <- STR_CLOB_STRLIST[", intlike!(), "]"), "vsqlimpl_pkg.item_{t1}({s1}, {s2})"),
    (N::Item, concat!("CLOB <- CLOBLIST[", intlike!(), "]"), "vsqlimpl_pkg.item_{t1}({s1}, {s2})"),
    (N::Item, concat!("INT <- INTLIST[", intlike!(), "]"), "vsqlimpl_pkg.item_{t1}({s1}, {s2})"),
    (N::Item, concat!("NUMBER <- NUMBERLIST[", intlike!(), "]"), "vsqlimpl_pkg.item_{t1}({s1}, {s2})"),
    (N::Item, concat!("DATE <- DATELIST[", intlike!(), "]"), "vsqlimpl_pkg.item_{t1}({s1}, {s2})"),
    (N::Item, concat!("DATETIME <- DATETIMELIST[", intlike!(), "]"), "vsqlimpl_pkg.item_{t1}({s1}, {s2})"),

    // BitAnd
    (N::BitAnd, concat!("INT <- ", intlike!(), " & ", intlike!()), "bitand({s1}, {s2})"),
    (N::BitAnd, "T1 <- INTSET & INTSET", "vsqlimpl_pkg.bitand_intset({s1}, {s2})"),
    (N::BitAnd, "T1 <- NUMBERSET & NUMBERSET", "vsqlimpl_pkg.bitand_numberset({s1}, {s2})"),
    (N::BitAnd, "T1 <- STRSET & STRSET", "vsqlimpl_pkg.bitand_strset({s1}, {s2})"),
    (N::BitAnd, "T1 <- DATESET_DATETIMESET & T1", "vsqlimpl_pkg.bitand_datetimeset({s1}, {s2})"),

    // BitOr
    (N::BitOr, concat!("INT <- ", intlike!(), " | ", intlike!()), "vsqlimpl_pkg.bitor_int({s1}, {s2})"),
    (N::BitOr, "T1 <- INTSET | INTSET", "vsqlimpl_pkg.bitor_intset({s1}, {s2})"),
    (N::BitOr, "T1 <- NUMBERSET | NUMBERSET", "vsqlimpl_pkg.bitor_numberset({s1}, {s2})"),
    (N::BitOr, "T1 <- STRSET | STRSET", "vsqlimpl_pkg.bitor_strset({s1}, {s2})"),
    (N::BitOr, "T1 <- DATESET_DATETIMESET | T1", "vsqlimpl_pkg.bitor_datetimeset({s1}, {s2})"),

    // BitXor
    (N::BitXor, concat!("INT <- ", intlike!(), " ^ ", intlike!()), "vsqlimpl_pkg.bitxor_int({s1}, {s2})"),

    // Not
    (N::Not, "BOOL <- ? NULL", "1"),
    (N::Not, "BOOL <- ? BOOL", "(case {s1} when 1 then 0 else 1 end)"),
    (N::Not, "BOOL <- ? INT_NUMBER_DATEDELTA_DATETIMEDELTA_MONTHDELTA", "(case nvl({s1}, 0) when 0 then 1 else 0 end)"),
    (N::Not, "BOOL <- ? DATE_DATETIME_STR_COLOR_GEO", "(case when {s1} is null then 1 else 0 end)"),
    (N::Not, concat!("BOOL <- ? ", any!()), "(1 - vsqlimpl_pkg.bool_{t1}({s1}))"),

    // Neg
    (N::Neg, "INT <- BOOL", "(-{s1})"),
    (N::Neg, "T1 <- INT_NUMBER_DATEDELTA_DATETIMEDELTA_MONTHDELTA", "(-{s1})"),

    // BitNot
    (N::BitNot, concat!("INT <- ", intlike!()), "(-{s1} - 1)"),

    // If
    (N::If, concat!("T1 <- ", any!(), " ? NULL ? T1"), "{s3}"),
    (N::If, concat!("INT <- ", intlike!(), " ? NULL ? ", intlike!()), "{s3}"),
    (N::If, concat!("NUMBER <- ", numberlike!(), " ? NULL ? ", numberlike!()), "{s3}"),
    (N::If, concat!("T1 <- ", any!(), " ? NULL ? NULL"), "{s3}"),
    (N::If, concat!("T3 <- NULL ? NULL ? ", any!()), "{s3}"),
    (N::If, concat!("T1 <- ", any!(), " ? ", numberstored!(), " ? T1"), "(case when nvl({s2}, 0) != 0 then {s1} else {s3} end)"),
    (N::If, concat!("INT <- ", intlike!(), " ? ", numberstored!(), " ? ", intlike!()), "(case when nvl({s2}, 0) != 0 then {s1} else {s3} end)"),
    (N::If, concat!("NUMBER <- ", numberlike!(), " ? ", numberstored!(), " ? ", numberlike!()), "(case when nvl({s2}, 0) != 0 then {s1} else {s3} end)"),
    (N::If, concat!("T1 <- ", any!(), " ? ", numberstored!(), " ? NULL"), "(case when nvl({s2}, 0) != 0 then {s1} else {s3} end)"),
    (N::If, concat!("T3 <- NULL ? ", numberstored!(), " ? ", any!()), "(case when nvl({s2}, 0) != 0 then {s1} else {s3} end)"),
    (N::If, concat!("T1 <- ", any!(), " ? DATE_DATETIME_STR_GEO ? T1"), "(case when {s2} is not null then {s1} else {s3} end)"),
    (N::If, concat!("INT <- ", intlike!(), " ? DATE_DATETIME_STR_GEO ? ", intlike!()), "(case when {s2} is not null then {s1} else {s3} end)"),
    (N::If, concat!("NUMBER <- ", numberlike!(), " ? DATE_DATETIME_STR_GEO ? ", numberlike!()), "(case when {s2} is not null then {s1} else {s3} end)"),
    (N::If, concat!("T1 <- ", any!(), " ? DATE_DATETIME_STR_GEO ? NULL"), "(case when {s2} is not null then {s1} else {s3} end)"),
    (N::If, concat!("T3 <- NULL ? DATE_DATETIME_STR_GEO ? ", any!()), "(case when {s2} is not null then {s1} else {s3} end)"),
    (N::If, concat!("T1 <- ", any!(), " ? ", any!(), " ? T1"), "(case when vsqlimpl_pkg.bool_{t2}({s2}) = 1 then {s1} else {s3} end)"),
    (N::If, concat!("INT <- ", intlike!(), " ? ", any!(), " ? ", intlike!()), "(case when vsqlimpl_pkg.bool_{t2}({s2}) = 1 then {s1} else {s3} end)"),
    (N::If, concat!("NUMBER <- ", numberlike!(), " ? ", any!(), " ? ", numberlike!()), "(case when vsqlimpl_pkg.bool_{t2}({s2}) = 1 then {s1} else {s3} end)"),
    (N::If, concat!("T1 <- ", any!(), " ? ", any!(), " ? NULL"), "(case when vsqlimpl_pkg.bool_{t2}({s2}) = 1 then {s1} else {s3} end)"),
    (N::If, concat!("T3 <- NULL ? ", any!(), " ? ", any!()), "(case when vsqlimpl_pkg.bool_{t2}({s2}) = 1 then {s1} else {s3} end)"),

    // Slice
    (N::Slice, concat!("T1 <- ", text!(), "_", list!(), "[NULL_", intlike!(), ":NULL_", intlike!(), "]"), "vsqlimpl_pkg.slice_{t1}({s1}, {s2}, {s3})"),
    (N::Slice, concat!("NULLLIST <- NULLLIST[NULL_", intlike!(), ":NULL_", intlike!(), "]"), "vsqlimpl_pkg.slice_{t1}({s1}, {s2}, {s3})"),
];
