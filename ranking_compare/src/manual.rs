/*!

This is the long-form manual for `ranking_compare` and `unirank`.

## Input tables

Four ranking tables are read, one per source: TIMES, QS, USN and Washington.
Each table has a header row and one row per institution and per year. The following
columns are recognized:

* `IPEDS_Name` (mandatory) the name of the institution. It is the key used to match
  institutions across sources, so it must be written identically in every table.
* `Year` (mandatory) the edition of the ranking. Integers, integral decimals (`2023.0`) and
  text (`"2023"`) are accepted. Any other content, including `2023.7` or a number out of
  the range of years, stops the loading of the table.
* `New_Jersey_University` (optional) `Yes` or `No`. Other values are treated as unknown.

Every other column is a metric and is kept verbatim, under its header name. Numbers are
kept as numbers, text as text, and blank cells are missing values. Rows that repeat an
institution and a year are all kept and reported in the logs; the first one is used for
lookups.

### `xlsx`

An Excel workbook. The worksheet is chosen by name (`Sheet1` by default).

### `csv`

A comma separated file, with the header in the first row. Cells that read as numbers are
treated as numbers.

```text
IPEDS_Name,Year,New_Jersey_University,Times_Rank,Teaching
New Jersey Institute of Technology,2023,Yes,401–500,31.2
Massachusetts Institute of Technology,2023,No,3,94.8
```

## Ranks

The headline rank of TIMES and QS is often published as a band (`201-250`, or with an
en-dash `201–250`). Bands are kept in the order in which they were published: `30-23` is
read as low `30` and high `23`. The midpoint is rounded down. A single number is a band
of width zero. Anything else (`Reporter`, `n/a`, `1-2-3`) is not a rank: the point is left
out of the rank charts, and the value is still shown as published in the indicators.

## Peer groups

Peer groups are read from a CSV file with the columns `PEER_TYPE` (the name of the group)
and `PEER_NAME` (an institution). If the file cannot be found, no group is offered and a
warning is reported.

## Selection rules

* Only the institutions present in all four sources can be picked in the sidebar. The
  New Jersey filter restricts this list, it never removes the members of a selected peer
  group.
* The home institution (New Jersey Institute of Technology by default) is always compared,
  and always listed first.
* When no peer group is selected and nothing else is picked, the default comparison
  institution (Rutgers University-New Brunswick by default) is shown. When a peer group is
  selected, the default comparison institution cannot be added by hand.
* Every source tab also offers the institutions that only this source covers. What is added
  in a tab is remembered for the rest of the session, and only for this tab.

## Configuration

`unirank` takes a configuration file in JSON:

```text
{
  "homeInstitution": "New Jersey Institute of Technology",
  "defaultComparison": "Rutgers University-New Brunswick",
  "peerGroups": { "filePath": "peer.csv" },
  "sources": {
    "times": { "provider": "xlsx", "filePath": "TIMES.xlsx", "sheetName": "Sheet1" },
    "qs": { "provider": "csv", "filePath": "QS.csv" },
    "usn": {
      "provider": "csv",
      "filePath": "USN.csv",
      "rankColumn": "Rank",
      "rankStyle": "scalar",
      "kpis": [{ "metric": "Rank", "label": "USN Rank" }],
      "charts": [{
        "section": "Student Success",
        "title": "Pell Graduation Rate",
        "description": "Graduation rate of low-income Pell Grant students.",
        "metrics": ["Pell_Graduation_Rate"]
      }]
    },
    "washington": { "provider": "csv", "filePath": "Washington.csv" }
  }
}
```

File paths are relative to the configuration file. `homeInstitution`, `defaultComparison`
and `peerGroups` are optional. For each source, `rankColumn`, `rankStyle` (`band` or
`scalar`), `kpis` and `charts` are optional and replace the standard layout of this source
when present.

 */
